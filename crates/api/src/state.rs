use std::sync::Arc;
use std::time::Duration;

use atelier_ai::anthropic::AnthropicClient;
use atelier_ai::gemini::GeminiClient;
use atelier_ai::AiError;
use atelier_pinterest::{PinterestClient, PinterestError};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Timeout for the cron orchestrator's calls into its own step endpoints.
const CRON_STEP_TIMEOUT: Duration = Duration::from_secs(300);

/// Failure to build the shared HTTP clients at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Pinterest(#[from] PinterestError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Gemini client, when `GEMINI_API_KEY` is set.
    pub gemini: Option<GeminiClient>,
    /// Claude client, when `ANTHROPIC_API_KEY` is set.
    pub anthropic: Option<AnthropicClient>,
    /// Pinterest client, when the app credentials are set.
    pub pinterest: Option<PinterestClient>,
    /// Plain client used by the cron orchestrator.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state from configuration, creating a client for every
    /// configured provider.
    pub fn new(pool: atelier_db::DbPool, config: ServerConfig) -> Result<Self, StateError> {
        let gemini = config
            .gemini
            .as_ref()
            .map(|p| GeminiClient::new(p.base_url.clone(), p.api_key.clone(), p.model.clone()))
            .transpose()?;

        let anthropic = config
            .anthropic
            .as_ref()
            .map(|p| AnthropicClient::new(p.base_url.clone(), p.api_key.clone(), p.model.clone()))
            .transpose()?;

        let pinterest = config
            .pinterest
            .clone()
            .map(PinterestClient::new)
            .transpose()?;

        let http = reqwest::Client::builder()
            .timeout(CRON_STEP_TIMEOUT)
            .build()?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            gemini,
            anthropic,
            pinterest,
            http,
        })
    }

    pub fn gemini(&self) -> AppResult<&GeminiClient> {
        self.gemini.as_ref().ok_or(AppError::NotConfigured("Gemini"))
    }

    pub fn anthropic(&self) -> AppResult<&AnthropicClient> {
        self.anthropic
            .as_ref()
            .ok_or(AppError::NotConfigured("Anthropic"))
    }

    pub fn pinterest(&self) -> AppResult<&PinterestClient> {
        self.pinterest
            .as_ref()
            .ok_or(AppError::NotConfigured("Pinterest"))
    }
}
