use atelier_pinterest::PinterestConfig;

use crate::auth::jwt::JwtConfig;

/// Connection settings for one hosted LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. Provider sections are `None` when their key is not
/// set; the dependent endpoints then answer 500 instead of blocking startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Front-end origin used for post-OAuth redirects.
    pub app_url: String,
    /// Whether cookies set by this server carry the `Secure` flag.
    pub cookie_secure: bool,
    /// Access-token validation settings.
    pub jwt: JwtConfig,
    pub gemini: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub pinterest: Option<PinterestConfig>,
    /// Bearer secret expected on `/api/cron/*`. Cron is disabled when unset.
    pub cron_secret: Option<String>,
    /// Origin the `run-all` orchestrator calls back into.
    pub cron_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                      |
    /// |----------------------------|------------------------------|
    /// | `HOST`                     | `0.0.0.0`                    |
    /// | `PORT`                     | `3000`                       |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`      |
    /// | `REQUEST_TIMEOUT_SECS`     | `60`                         |
    /// | `APP_URL`                  | `http://localhost:3000`      |
    /// | `COOKIE_SECURE`            | `true`                       |
    /// | `GEMINI_MODEL`             | `gemini-1.5-flash`           |
    /// | `ANTHROPIC_MODEL`          | `claude-3-5-sonnet-latest`   |
    /// | `CRON_BASE_URL`            | `http://127.0.0.1:{PORT}`    |
    ///
    /// `SUPABASE_JWT_SECRET` is required; see [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| !matches!(v.trim(), "false" | "0"))
            .unwrap_or(true);

        let gemini = optional_env("GEMINI_API_KEY").map(|api_key| ProviderConfig {
            api_key,
            model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| atelier_ai::gemini::DEFAULT_MODEL.into()),
            base_url: optional_env("GEMINI_BASE_URL")
                .unwrap_or_else(|| atelier_ai::gemini::DEFAULT_BASE_URL.into()),
        });

        let anthropic = optional_env("ANTHROPIC_API_KEY").map(|api_key| ProviderConfig {
            api_key,
            model: optional_env("ANTHROPIC_MODEL")
                .unwrap_or_else(|| atelier_ai::anthropic::DEFAULT_MODEL.into()),
            base_url: optional_env("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| atelier_ai::anthropic::DEFAULT_BASE_URL.into()),
        });

        let pinterest = match (
            optional_env("PINTEREST_CLIENT_ID"),
            optional_env("PINTEREST_CLIENT_SECRET"),
        ) {
            (Some(client_id), Some(client_secret)) => Some(PinterestConfig {
                client_id,
                client_secret,
                redirect_uri: optional_env("PINTEREST_REDIRECT_URI").unwrap_or_else(|| {
                    format!("http://localhost:{port}/api/pinterest/callback")
                }),
                api_base: optional_env("PINTEREST_API_BASE")
                    .unwrap_or_else(|| atelier_pinterest::client::DEFAULT_API_BASE.into()),
                oauth_base: optional_env("PINTEREST_OAUTH_BASE")
                    .unwrap_or_else(|| atelier_pinterest::client::DEFAULT_OAUTH_BASE.into()),
            }),
            _ => None,
        };

        let cron_secret = optional_env("CRON_SECRET");
        let cron_base_url = optional_env("CRON_BASE_URL")
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}"))
            .trim_end_matches('/')
            .to_string();

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_url,
            cookie_secure,
            jwt,
            gemini,
            anthropic,
            pinterest,
            cron_secret,
            cron_base_url,
        }
    }
}

/// Read an env var, treating unset and blank the same.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
