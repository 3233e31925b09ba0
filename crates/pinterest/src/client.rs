//! REST client for Pinterest OAuth and the v5 Boards/Pins API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::PinterestError;
use crate::models::{Board, Page, Pin, TokenResponse};

pub const DEFAULT_API_BASE: &str = "https://api.pinterest.com";
pub const DEFAULT_OAUTH_BASE: &str = "https://www.pinterest.com";

/// Scopes requested during authorization.
pub const OAUTH_SCOPES: &str = "boards:read,pins:read";

/// Page size requested from list endpoints.
const PAGE_SIZE: &str = "50";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// App credentials and endpoints.
#[derive(Debug, Clone)]
pub struct PinterestConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
    pub oauth_base: String,
}

/// HTTP client for one Pinterest app registration.
#[derive(Debug, Clone)]
pub struct PinterestClient {
    client: reqwest::Client,
    config: PinterestConfig,
}

impl PinterestClient {
    pub fn new(mut config: PinterestConfig) -> Result<Self, PinterestError> {
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.oauth_base = config.oauth_base.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// URL of the consent screen the browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> Result<String, PinterestError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/oauth/", self.config.oauth_base),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", OAUTH_SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| PinterestError::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Client credentials are sent with HTTP Basic auth.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, PinterestError> {
        let response = self
            .client
            .post(format!("{}/v5/oauth/token", self.config.api_base))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// First page of the token owner's boards.
    pub async fn list_boards(&self, access_token: &str) -> Result<Page<Board>, PinterestError> {
        self.get_json(access_token, &format!("{}/v5/boards", self.config.api_base))
            .await
    }

    /// First page of pins on a board.
    pub async fn list_board_pins(
        &self,
        access_token: &str,
        board_id: &str,
    ) -> Result<Page<Pin>, PinterestError> {
        let mut url = reqwest::Url::parse(&format!("{}/v5/boards", self.config.api_base))
            .map_err(|e| PinterestError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| PinterestError::InvalidUrl(self.config.api_base.clone()))?
            .push(board_id)
            .push("pins");
        self.get_json(access_token, url.as_str()).await
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        url: &str,
    ) -> Result<T, PinterestError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .query(&[("page_size", PAGE_SIZE)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PinterestError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::info!("Pinterest rejected the access token");
            return Err(PinterestError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "Pinterest API error");
            return Err(PinterestError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
