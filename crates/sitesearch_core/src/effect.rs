use crate::{SearchRequest, SessionHandle, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the network call for a freshly started session.
    RunSearch {
        handle: SessionHandle,
        request: SearchRequest,
    },
    /// The submission failed validation; the session was left untouched.
    SubmissionRejected { reason: ValidationError },
    /// The session entered Success; the view may run its presentation effect.
    PresentResults { handle: SessionHandle, count: usize },
    /// The session entered Error.
    ShowError {
        handle: SessionHandle,
        message: String,
    },
}
