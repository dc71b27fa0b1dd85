//! A live search pipeline bound to one opening of the search modal.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::backend::SearchBackend;
use super::config::SearchConfig;
use super::errors::SearchError;
use super::gate::normalize_query;
use super::model::ResultSnapshot;
use super::store::{ResultStore, StoreState};
use super::worker::{PipelineWorker, QueryEvent};

/// Search subscription owned by an open modal.
///
/// Opening spawns the pipeline worker on the current tokio runtime; closing
/// (or dropping) the session aborts it, cancelling the debounce timer and any
/// in-flight lookups. Nothing is written to the store after [`close`]
/// returns.
///
/// [`close`]: SearchSession::close
pub struct SearchSession {
    tx: mpsc::UnboundedSender<QueryEvent>,
    store: Arc<ResultStore>,
    worker: Option<JoinHandle<()>>,
    config: SearchConfig,
}

impl SearchSession {
    /// Starts a new session.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn open(backend: Arc<dyn SearchBackend>, config: SearchConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::new(ResultStore::new());
        let worker = PipelineWorker::new(backend, Arc::clone(&store), config);
        let handle = tokio::spawn(worker.run(rx));

        info!("Search session opened");
        Self {
            tx,
            store,
            worker: Some(handle),
            config,
        }
    }

    /// Feeds the latest raw input value into the pipeline.
    ///
    /// An empty (or whitespace-only) value clears the results before this
    /// returns, without dispatching any lookup.
    pub fn set_query(&self, raw: &str) -> Result<(), SearchError> {
        let event = match normalize_query(raw) {
            Some(query) => QueryEvent::Input {
                query: query.to_string(),
                epoch: self.store.epoch(),
            },
            None => {
                let generation = self.store.reset();
                debug!("Input cleared, results reset (generation {})", generation);
                QueryEvent::Cleared
            }
        };

        self.tx.send(event).map_err(|_| {
            warn!("Search pipeline is no longer running");
            SearchError::SessionClosed
        })
    }

    /// Receiver for state changes. A new subscriber immediately observes the
    /// latest state.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> StoreState {
        self.store.current()
    }

    pub fn snapshot(&self) -> Arc<ResultSnapshot> {
        self.store.current().snapshot
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tears the pipeline down and waits for the worker to stop.
    pub async fn close(mut self) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Search pipeline ended abnormally: {}", e);
                }
            }
        }
        info!("Search session closed");
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            handle.abort();
        }
    }
}
