use crate::config::{ClientConfig, RESTLI_PROTOCOL_VERSION};
use tokio::sync::OnceCell;

/// Per-process API session: credentials, endpoints and the cached identity
#[derive(Debug)]
pub struct SessionContext {
    token: String,
    base_url: String,
    identity_url: String,
    headers: Vec<(String, String)>,
    /// Written once by the identity resolver, never cleared
    identity: OnceCell<String>,
}

impl SessionContext {
    pub fn new(config: &ClientConfig) -> Self {
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", config.access_token)),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("LinkedIn-Version".to_string(), config.api_version.clone()),
            ("X-Restli-Protocol-Version".to_string(), RESTLI_PROTOCOL_VERSION.to_string()),
        ];

        Self {
            token: config.access_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            identity_url: config.identity_url.clone(),
            headers,
            identity: OnceCell::new(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn identity_url(&self) -> &str {
        &self.identity_url
    }

    /// Headers sent with every provider call
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Absolute URL for a path under the REST base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Person URN, if it has been resolved already
    pub fn cached_identity(&self) -> Option<&str> {
        self.identity.get().map(String::as_str)
    }

    pub(crate) fn identity_cell(&self) -> &OnceCell<String> {
        &self.identity
    }
}
