use futures_util::StreamExt;
use serde_json::Value;
use sitesearch_core::{normalize_with_stats, ResultSet, SearchRequest};
use sitesearch_logging::{search_debug, search_info, search_warn};

use crate::{ClientError, ClientSettings};

/// The remote search contract: one attempt, no retry.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<ResultSet, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: ClientSettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let endpoint = settings.search_endpoint()?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::network(err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl SearchBackend for ReqwestSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<ResultSet, ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("url", request.url()), ("query", request.query())])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        search_debug!("POST {} -> {}", self.endpoint, status);
        if !status.is_success() {
            return Err(ClientError::Network {
                message: format!("backend responded with {status}"),
                status: Some(status.as_u16()),
            });
        }

        let body = self.read_body(response).await?;
        let raw = parse_result_array(&body)?;
        let normalized = normalize_with_stats(raw);
        if normalized.dropped > 0 {
            search_warn!(
                "Dropped {} duplicate or malformed results from backend",
                normalized.dropped
            );
        }
        search_info!(
            "Backend returned {} results for url={}",
            normalized.results.len(),
            request.url()
        );
        Ok(normalized.results)
    }
}

/// The body must be a JSON array; its elements are vetted later by the normalizer.
fn parse_result_array(body: &[u8]) -> Result<Vec<Value>, ClientError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ClientError::malformed(format!("body is not JSON: {err}")))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ClientError::malformed(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ClientError {
    ClientError::network(format!(
        "response too large (max {max_bytes} bytes, got {actual})"
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::network(format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return ClientError::network(format!("could not reach backend: {err}"));
    }
    ClientError::network(err.to_string())
}
