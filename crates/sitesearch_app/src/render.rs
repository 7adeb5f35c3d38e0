use sitesearch_core::{AppViewModel, ResultRowView, StatusView, EMPTY_RESULTS_MESSAGE};

const SCORE_BAR_WIDTH: usize = 20;
const INDENT: &str = "    ";
const IDLE_PROMPT: &str = "Enter a site URL followed by a query, e.g. `https://example.com faq`.";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }

    match &view.status {
        StatusView::Idle => {
            lines.push(IDLE_PROMPT.to_string());
        }
        StatusView::Loading { url, query } => {
            lines.push(format!("Searching {url} for \"{query}\"..."));
        }
        StatusView::Error { message } => {
            lines.push(format!("Error: {message}"));
        }
        StatusView::Success { url, query, count } => {
            lines.push(format!("Search Results ({count}) for \"{query}\" on {url}"));
            if view.results.is_empty() {
                lines.push(EMPTY_RESULTS_MESSAGE.to_string());
            }
            for row in &view.results {
                lines.push(String::new());
                lines.extend(render_row(row));
            }
        }
    }

    lines
}

fn render_row(row: &ResultRowView) -> Vec<String> {
    let mut lines = vec![format!(
        "[{rank}] {bar} {pct}% | Path: {path}",
        rank = row.rank,
        bar = score_bar(row.match_percentage),
        pct = row.match_percentage,
        path = row.display_path
    )];
    lines.extend(row.content_preview.lines().map(|line| format!("{INDENT}{line}")));
    match &row.html_preview {
        Some(html) => {
            lines.push(format!("{INDENT}HTML (`:html {}` to hide):", row.rank));
            lines.extend(html.lines().map(|line| format!("{INDENT}{INDENT}{line}")));
        }
        None => lines.push(format!("{INDENT}(`:html {}` to view HTML)", row.rank)),
    }
    lines
}

fn score_bar(percentage: f64) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * SCORE_BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(SCORE_BAR_WIDTH - filled))
}
