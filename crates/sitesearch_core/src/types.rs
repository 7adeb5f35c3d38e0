use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque correlation token for one submit-to-resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a site URL is required")]
    EmptyUrl,
    #[error("a search query is required")]
    EmptyQuery,
}

/// A validated search submission. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    url: String,
    query: String,
}

impl SearchRequest {
    pub fn new(url: &str, query: &str) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self {
            url: url.to_string(),
            query: query.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// One ranked match as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    /// Opaque rank reported by the backend, roughly 0-100. Never re-normalized.
    pub match_score: f64,
    pub html: String,
    pub path: String,
}

/// Backend order, unique non-empty `content` values.
///
/// Only [`crate::normalize`] builds a non-empty set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet(Vec<SearchResult>);

impl ResultSet {
    pub(crate) fn from_unique(results: Vec<SearchResult>) -> Self {
        Self(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
