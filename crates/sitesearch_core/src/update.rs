use sitesearch_logging::{search_debug, search_info, search_warn};

use crate::{AppState, Effect, Msg, Resolution, SearchOutcome, SessionHandle, ValidationError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted { url, query } => {
            let (state, _, effects) = update_submission(state, &url, &query);
            return (state, effects);
        }
        Msg::SearchCompleted { handle, outcome } => {
            let effect = match &outcome {
                SearchOutcome::Success(results) => Effect::PresentResults {
                    handle,
                    count: results.len(),
                },
                SearchOutcome::Failure(message) => Effect::ShowError {
                    handle,
                    message: message.clone(),
                },
            };
            match state.resolve(handle, outcome) {
                Resolution::Applied => vec![effect],
                Resolution::Discarded => {
                    search_debug!("Discarding outcome for stale search {}", handle);
                    Vec::new()
                }
            }
        }
        Msg::HtmlToggled { index } => {
            if !state.toggle_html(index) {
                search_debug!("Ignoring HTML toggle for missing result {}", index);
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
    };

    (state, effects)
}

/// Submission step of [`update`] that also hands back the new handle or the rejection reason.
pub fn update_submission(
    mut state: AppState,
    url: &str,
    query: &str,
) -> (AppState, Result<SessionHandle, ValidationError>, Vec<Effect>) {
    match state.submit(url, query) {
        Ok((handle, request)) => {
            search_info!(
                "Search {} accepted url={} query_len={}",
                handle,
                request.url(),
                request.query().len()
            );
            (state, Ok(handle), vec![Effect::RunSearch { handle, request }])
        }
        Err(reason) => {
            search_warn!("Search rejected: {}", reason);
            (
                state,
                Err(reason),
                vec![Effect::SubmissionRejected { reason }],
            )
        }
    }
}
