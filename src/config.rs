use crate::browser::LaunchOptions;
use crate::error::ConfigError;
use std::time::Duration;

/// Default REST base URL
pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/rest";

/// Default value of the `LinkedIn-Version` header (YYYYMM)
pub const DEFAULT_API_VERSION: &str = "202510";

/// Identity discovery endpoint (OpenID userinfo), outside the REST base URL
pub const DEFAULT_IDENTITY_URL: &str = "https://api.linkedin.com/v2/userinfo";

/// Fixed value of the `X-Restli-Protocol-Version` header
pub const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Name of the LinkedIn session cookie
pub const SESSION_COOKIE_NAME: &str = "li_at";

/// Default delay after navigation to let client-side rendering finish
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(4);

/// Configuration for the REST API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth bearer token
    pub access_token: String,

    /// REST base URL, without trailing slash
    pub base_url: String,

    /// `LinkedIn-Version` header value
    pub api_version: String,

    /// Absolute URL of the primary identity endpoint
    pub identity_url: String,
}

impl ClientConfig {
    /// Create a config with default endpoints for the given token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
        }
    }

    /// Builder method: override the REST base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method: override the `LinkedIn-Version` header
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Builder method: override the identity endpoint
    pub fn with_identity_url(mut self, identity_url: impl Into<String>) -> Self {
        self.identity_url = identity_url.into();
        self
    }

    /// Check the token is present and the version header is YYYYMM
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        let version = self.api_version.as_str();
        if version.len() != 6 || !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidApiVersion(self.api_version.clone()));
        }

        Ok(())
    }
}

/// Configuration for the browser-session post reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Value of the `li_at` session cookie
    pub session_cookie: String,

    /// Fixed wait after navigation
    pub settle_delay: Duration,

    /// Browser launch options
    pub launch: LaunchOptions,
}

impl ReaderConfig {
    /// Create a reader config; accepts either `<value>` or `li_at=<value>`
    pub fn new(session_cookie: impl AsRef<str>) -> Self {
        Self {
            session_cookie: normalize_cookie(session_cookie.as_ref()),
            settle_delay: DEFAULT_SETTLE_DELAY,
            launch: LaunchOptions::default(),
        }
    }

    /// Builder method: set the settle delay
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Builder method: set the launch options
    pub fn launch_options(mut self, launch: LaunchOptions) -> Self {
        self.launch = launch;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_cookie.is_empty() {
            return Err(ConfigError::EmptyCookie);
        }
        Ok(())
    }
}

/// Strip an optional `li_at=` prefix and surrounding whitespace/quotes
pub fn normalize_cookie(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"');
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    trimmed.strip_prefix(prefix.as_str()).unwrap_or(trimmed).trim().to_string()
}
