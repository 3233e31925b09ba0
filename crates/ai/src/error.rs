/// Errors from the AI provider clients.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered but the response carried no text.
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),
}

/// Read a response, turning non-2xx statuses into [`AiError::Api`].
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(AiError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
