/// Errors from the Pinterest client.
#[derive(Debug, thiserror::Error)]
pub enum PinterestError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The access token was rejected (expired or revoked).
    #[error("Pinterest rejected the access token")]
    Unauthorized,

    /// Pinterest returned another non-2xx status code.
    #[error("Pinterest API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A configured URL could not be parsed.
    #[error("Invalid Pinterest URL: {0}")]
    InvalidUrl(String),
}
