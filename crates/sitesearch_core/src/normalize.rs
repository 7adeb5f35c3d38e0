use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::{ResultSet, SearchResult};

/// Lenient view of one backend element. Absent fields take the backend's defaults.
#[derive(Debug, Deserialize)]
struct RawEntry {
    content: Option<String>,
    match_score: Option<f64>,
    html: Option<String>,
    path: Option<String>,
}

/// Result of [`normalize_with_stats`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub results: ResultSet,
    /// Raw elements that were malformed, had no content, or repeated an earlier content.
    pub dropped: usize,
}

/// Stable de-duplication of a raw backend sequence. First occurrence of a `content` wins.
pub fn normalize<I>(raw: I) -> ResultSet
where
    I: IntoIterator<Item = Value>,
{
    normalize_with_stats(raw).results
}

pub fn normalize_with_stats<I>(raw: I) -> Normalized
where
    I: IntoIterator<Item = Value>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();
    let mut dropped = 0;

    for value in raw {
        let Some(result) = parse_entry(value) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(result.content.clone()) {
            dropped += 1;
            continue;
        }
        results.push(result);
    }

    Normalized {
        results: ResultSet::from_unique(results),
        dropped,
    }
}

fn parse_entry(value: Value) -> Option<SearchResult> {
    // Null, non-objects and wrongly typed fields all fail here.
    let entry: RawEntry = serde_json::from_value(value).ok()?;
    let content = entry.content.filter(|content| !content.is_empty())?;
    Some(SearchResult {
        content,
        match_score: entry.match_score.unwrap_or(0.0),
        html: entry.html.unwrap_or_default(),
        path: entry.path.unwrap_or_default(),
    })
}
