use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use sitesearch_core::{SearchRequest, SessionHandle};
use sitesearch_logging::search_warn;

use crate::client::{ReqwestSearchClient, SearchBackend};
use crate::{ClientError, ClientSettings, EngineEvent};

enum EngineCommand {
    Search {
        handle: SessionHandle,
        request: SearchRequest,
    },
}

/// Runs searches on a background tokio runtime and reports completions over a channel.
///
/// Every submitted search runs to completion; superseded ones are not aborted.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let backend = Arc::new(ReqwestSearchClient::new(settings)?);
        Self::with_backend(backend)
    }

    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Result<Self, ClientError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime =
            tokio::runtime::Runtime::new().map_err(|err| ClientError::Runtime(err.to_string()))?;

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    /// Queues a search. If the worker is gone the search finishes at once as a network error.
    pub fn submit(&self, handle: SessionHandle, request: SearchRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Search { handle, request })
            .is_err()
        {
            search_warn!("Search engine stopped; failing search {}", handle);
            let _ = self.event_tx.send(EngineEvent::SearchFinished {
                handle,
                result: Err(ClientError::network("search engine is not running")),
            });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn SearchBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Search { handle, request } => {
            let result = backend.search(&request).await;
            let _ = event_tx.send(EngineEvent::SearchFinished { handle, result });
        }
    }
}
