use std::collections::BTreeSet;

use url::Url;

use crate::{SearchResult, SessionState};

pub const CONTENT_PREVIEW_CHARS: usize = 300;
pub const HTML_PREVIEW_CHARS: usize = 500;
pub const EMPTY_RESULTS_MESSAGE: &str = "No results found. Try a different search query.";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub status: StatusView,
    pub results: Vec<ResultRowView>,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusView {
    #[default]
    Idle,
    Loading {
        url: String,
        query: String,
    },
    Error {
        message: String,
    },
    Success {
        url: String,
        query: String,
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRowView {
    /// 1-based position in the result set.
    pub rank: usize,
    pub content_preview: String,
    pub match_percentage: f64,
    pub display_path: String,
    /// Present only while the row's HTML toggle is open.
    pub html_preview: Option<String>,
}

pub(crate) fn build(
    session: &SessionState,
    expanded_html: &BTreeSet<usize>,
    notice: Option<String>,
    dirty: bool,
) -> AppViewModel {
    let (status, results) = match session {
        SessionState::Idle => (StatusView::Idle, Vec::new()),
        SessionState::Loading { request, .. } => (
            StatusView::Loading {
                url: request.url().to_string(),
                query: request.query().to_string(),
            },
            Vec::new(),
        ),
        SessionState::Error { message, .. } => (
            StatusView::Error {
                message: message.clone(),
            },
            Vec::new(),
        ),
        SessionState::Success {
            request, results, ..
        } => {
            let rows = results
                .iter()
                .enumerate()
                .map(|(index, result)| row_view(index, result, expanded_html.contains(&index)))
                .collect();
            (
                StatusView::Success {
                    url: request.url().to_string(),
                    query: request.query().to_string(),
                    count: results.len(),
                },
                rows,
            )
        }
    };

    AppViewModel {
        status,
        results,
        notice,
        dirty,
    }
}

fn row_view(index: usize, result: &SearchResult, html_open: bool) -> ResultRowView {
    ResultRowView {
        rank: index + 1,
        content_preview: truncate_with_ellipsis(&result.content, CONTENT_PREVIEW_CHARS),
        match_percentage: match_percentage(result.match_score),
        display_path: format_path(&result.path),
        html_preview: html_open.then(|| truncate_with_ellipsis(&result.html, HTML_PREVIEW_CHARS)),
    }
}

/// Rounds the backend score to two decimal places for display.
pub fn match_percentage(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Pathname of `path` when it parses as an absolute URL, otherwise the raw string.
pub fn format_path(path: &str) -> String {
    match Url::parse(path) {
        Ok(url) if url.path().is_empty() => "/".to_string(),
        Ok(url) => url.path().to_string(),
        Err(_) if path.is_empty() => "/".to_string(),
        Err(_) => path.to_string(),
    }
}

pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &text[..end]),
        None => text.to_string(),
    }
}
