use std::time::Duration;

use crate::ClientError;

/// Used when neither a flag nor [`BASE_URL_ENV`] names the backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "SITESEARCH_API_BASE_URL";
pub const SEARCH_PATH: &str = "search";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` keeps the transport default (no deadline).
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `<base>/search`, ignoring a trailing `/` on the base.
    pub fn search_endpoint(&self) -> Result<reqwest::Url, ClientError> {
        let base = self.base_url.trim().trim_end_matches('/');
        let endpoint = reqwest::Url::parse(&format!("{base}/{SEARCH_PATH}")).map_err(|err| {
            ClientError::InvalidEndpoint {
                base_url: self.base_url.clone(),
                message: err.to_string(),
            }
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                base_url: self.base_url.clone(),
                message: "not a hierarchical URL".to_string(),
            });
        }
        Ok(endpoint)
    }
}
