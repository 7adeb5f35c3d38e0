use std::collections::BTreeSet;

use crate::view_model::{self, AppViewModel};
use crate::{
    Resolution, SearchOutcome, SearchRequest, SessionHandle, SessionMachine, SessionState,
    ValidationError,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionMachine,
    /// Result indices whose HTML preview is open. Cleared when a session starts.
    expanded_html: BTreeSet<usize>,
    /// Last rejected submission, shown until the next accepted one.
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        self.session.current()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self.session(), &self.expanded_html, self.notice.clone(), self.dirty)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn submit(
        &mut self,
        url: &str,
        query: &str,
    ) -> Result<(SessionHandle, SearchRequest), ValidationError> {
        let request = match SearchRequest::new(url, query) {
            Ok(request) => request,
            Err(err) => {
                self.notice = Some(err.to_string());
                self.dirty = true;
                return Err(err);
            }
        };
        let handle = self.session.start(request.clone());
        self.expanded_html.clear();
        self.notice = None;
        self.dirty = true;
        Ok((handle, request))
    }

    pub(crate) fn resolve(&mut self, handle: SessionHandle, outcome: SearchOutcome) -> Resolution {
        let resolution = self.session.resolve(handle, outcome);
        if resolution == Resolution::Applied {
            self.dirty = true;
        }
        resolution
    }

    pub(crate) fn toggle_html(&mut self, index: usize) -> bool {
        let in_range = match self.session.current() {
            SessionState::Success { results, .. } => index < results.len(),
            _ => false,
        };
        if !in_range {
            return false;
        }
        if !self.expanded_html.remove(&index) {
            self.expanded_html.insert(index);
        }
        self.dirty = true;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.session.reset();
        self.expanded_html.clear();
        self.notice = None;
        self.dirty = true;
    }
}
