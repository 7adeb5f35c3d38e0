use sitesearch_core::{ResultSet, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Transport failure, non-2xx status, or an oversized body.
    #[error("network error: {message}")]
    Network { message: String, status: Option<u16> },
    /// The body was not a JSON array of result objects.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
    #[error("invalid backend address {base_url}: {message}")]
    InvalidEndpoint { base_url: String, message: String },
    #[error("failed to start search runtime: {0}")]
    Runtime(String),
}

impl ClientError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchFinished {
        handle: SessionHandle,
        result: Result<ResultSet, ClientError>,
    },
}
