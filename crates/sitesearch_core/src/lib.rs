//! Sitesearch core: pure session state machine, result normalization and view-model helpers.
mod effect;
mod msg;
mod normalize;
mod session;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use normalize::{normalize, normalize_with_stats, Normalized};
pub use session::{Resolution, SearchOutcome, SessionMachine, SessionState};
pub use state::AppState;
pub use types::{ResultSet, SearchRequest, SearchResult, SessionHandle, ValidationError};
pub use update::{update, update_submission};
pub use view_model::{
    format_path, match_percentage, truncate_with_ellipsis, AppViewModel, ResultRowView,
    StatusView, CONTENT_PREVIEW_CHARS, EMPTY_RESULTS_MESSAGE, HTML_PREVIEW_CHARS,
};
