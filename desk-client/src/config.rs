//! Client configuration

use std::env;

use crate::{ClientError, ClientResult};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the SalesDesk backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Identity sent as `x-user-email` on every request
    pub user_email: Option<String>,

    /// Bearer token, when the deployment fronts the API with one
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_email: None,
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the environment (and `.env`, if present)
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SALESDESK_API_URL` | `http://localhost:8000` |
    /// | `SALESDESK_USER_EMAIL` | unset |
    /// | `SALESDESK_TOKEN` | unset |
    /// | `SALESDESK_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> ClientResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            env::var("SALESDESK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );
        config.user_email = env::var("SALESDESK_USER_EMAIL").ok().filter(|v| !v.is_empty());
        config.token = env::var("SALESDESK_TOKEN").ok().filter(|v| !v.is_empty());

        if let Ok(raw) = env::var("SALESDESK_TIMEOUT_SECS") {
            config.timeout = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("SALESDESK_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        Ok(config)
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
