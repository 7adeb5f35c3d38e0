use crate::{ResultSet, SearchRequest, SessionHandle, ValidationError};

/// The single current lifecycle state of the search session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading {
        handle: SessionHandle,
        request: SearchRequest,
    },
    Success {
        handle: SessionHandle,
        request: SearchRequest,
        results: ResultSet,
    },
    Error {
        handle: SessionHandle,
        request: SearchRequest,
        message: String,
    },
}

impl SessionState {
    pub fn handle(&self) -> Option<SessionHandle> {
        match self {
            SessionState::Idle => None,
            SessionState::Loading { handle, .. }
            | SessionState::Success { handle, .. }
            | SessionState::Error { handle, .. } => Some(*handle),
        }
    }

    pub fn request(&self) -> Option<&SearchRequest> {
        match self {
            SessionState::Idle => None,
            SessionState::Loading { request, .. }
            | SessionState::Success { request, .. }
            | SessionState::Error { request, .. } => Some(request),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }
}

/// How a finished search ended, before it is applied to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(ResultSet),
    Failure(String),
}

/// Whether [`SessionMachine::resolve`] changed the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The handle is not the one currently loading (superseded or already resolved).
    Discarded,
}

/// Idle -> Loading -> Success | Error, with last-submission-wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionMachine {
    current: SessionState,
    last_handle: u64,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &SessionState {
        &self.current
    }

    /// Validates and starts a new session, superseding whatever state preceded it.
    ///
    /// On a validation failure the current state is left untouched.
    pub fn submit(&mut self, url: &str, query: &str) -> Result<SessionHandle, ValidationError> {
        let request = SearchRequest::new(url, query)?;
        Ok(self.start(request))
    }

    pub fn start(&mut self, request: SearchRequest) -> SessionHandle {
        self.last_handle += 1;
        let handle = SessionHandle::new(self.last_handle);
        self.current = SessionState::Loading { handle, request };
        handle
    }

    /// Applies `outcome` only if `handle` is the session currently loading.
    pub fn resolve(&mut self, handle: SessionHandle, outcome: SearchOutcome) -> Resolution {
        let request = match &self.current {
            SessionState::Loading {
                handle: current,
                request,
            } if *current == handle => request.clone(),
            _ => return Resolution::Discarded,
        };

        self.current = match outcome {
            SearchOutcome::Success(results) => SessionState::Success {
                handle,
                request,
                results,
            },
            SearchOutcome::Failure(message) => SessionState::Error {
                handle,
                request,
                message,
            },
        };
        Resolution::Applied
    }

    pub fn reset(&mut self) {
        self.current = SessionState::Idle;
    }
}
