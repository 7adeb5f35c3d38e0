//! Sitesearch client: backend contract, failure classification and background execution.
mod client;
mod engine;
mod settings;
mod types;

pub use client::{ReqwestSearchClient, SearchBackend};
pub use engine::EngineHandle;
pub use settings::{ClientSettings, BASE_URL_ENV, DEFAULT_BASE_URL, SEARCH_PATH};
pub use types::{ClientError, EngineEvent};
