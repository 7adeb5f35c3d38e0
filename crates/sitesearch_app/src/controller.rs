use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sitesearch_client::{ClientError, ClientSettings, EngineEvent, EngineHandle, SearchBackend};
use sitesearch_core::{
    update, update_submission, AppState, AppViewModel, Effect, Msg, SearchOutcome, SessionHandle,
    SessionState, ValidationError,
};
use sitesearch_logging::{search_debug, search_warn};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

/// Something the view may react to after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ResultsPresented { handle: SessionHandle, count: usize },
    ErrorShown { handle: SessionHandle, message: String },
}

/// The one object the view talks to: owns the session state and the search engine.
///
/// Only the latest submission's outcome is ever applied; earlier in-flight searches
/// finish in the background and are discarded on arrival.
pub struct PresentationController {
    state: AppState,
    engine: EngineHandle,
    notifications: VecDeque<Notification>,
}

impl PresentationController {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Result<Self, ClientError> {
        Ok(Self::with_engine(EngineHandle::with_backend(backend)?))
    }

    fn with_engine(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            engine,
            notifications: VecDeque::new(),
        }
    }

    pub fn current_state(&self) -> &SessionState {
        self.state.session()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Starts a new session, superseding the current one.
    ///
    /// Invalid input is rejected before any network call and leaves the session as it was.
    pub fn submit(&mut self, url: &str, query: &str) -> Result<SessionHandle, ValidationError> {
        let state = std::mem::take(&mut self.state);
        let (state, answer, effects) = update_submission(state, url, query);
        self.state = state;
        self.run_effects(effects);
        answer
    }

    pub fn toggle_html(&mut self, index: usize) {
        let effects = self.dispatch(Msg::HtmlToggled { index });
        self.run_effects(effects);
    }

    pub fn reset(&mut self) {
        let effects = self.dispatch(Msg::ResetClicked);
        self.run_effects(effects);
    }

    /// Applies every search completion that has already arrived. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.engine.try_recv() {
            self.apply_engine_event(event);
            handled += 1;
        }
        handled
    }

    /// Blocks up to `timeout` for one completion, then drains any others.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                self.apply_engine_event(event);
                self.process_pending();
                true
            }
            None => false,
        }
    }

    /// Blocks until the current session leaves Loading, or `timeout` passes.
    pub fn wait_until_settled(&mut self, timeout: Option<Duration>) -> &SessionState {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        while self.current_state().is_loading() {
            let wait = match deadline {
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    if left.is_zero() {
                        break;
                    }
                    left.min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };
            self.wait_for_event(wait);
        }
        self.current_state()
    }

    /// The view model if anything changed since the last call.
    pub fn take_render(&mut self) -> Option<AppViewModel> {
        let view = self.state.view();
        self.state.consume_dirty().then_some(view)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn apply_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::SearchFinished { handle, result } => {
                let outcome = match result {
                    Ok(results) => SearchOutcome::Success(results),
                    Err(err) => {
                        search_warn!("Search {} failed: {}", handle, err);
                        SearchOutcome::Failure(err.to_string())
                    }
                };
                let effects = self.dispatch(Msg::SearchCompleted { handle, outcome });
                self.run_effects(effects);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RunSearch { handle, request } => self.engine.submit(handle, request),
                other => self.notify(other),
            }
        }
    }

    fn notify(&mut self, effect: Effect) {
        let notification = match effect {
            Effect::PresentResults { handle, count } => {
                Notification::ResultsPresented { handle, count }
            }
            Effect::ShowError { handle, message } => Notification::ErrorShown { handle, message },
            // The reason is already on the view as a notice.
            Effect::SubmissionRejected { .. } => return,
            Effect::RunSearch { .. } => {
                search_debug!("Ignoring search effect in notify: {:?}", effect);
                return;
            }
        };
        self.notifications.push_back(notification);
    }
}
