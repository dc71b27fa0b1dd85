//! Result store read by the render path.
//!
//! Backed by a `watch` channel so every subscriber, including one that
//! subscribes late, sees the most recent state without re-querying.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::model::ResultSnapshot;

/// Where the pipeline currently is, as far as the UI is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchPhase {
    /// No query, nothing to show.
    Idle,
    /// Waiting for typing to pause.
    Debouncing,
    /// Lookups dispatched, join not yet settled.
    Loading,
    /// Snapshot for the latest settled query is shown.
    Settled,
}

/// What the search modal renders.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Generation of the snapshot shown (0 before anything happened).
    pub generation: u64,
    /// Number of times the input has been cleared.
    pub epoch: u64,
    /// Settled query the snapshot belongs to; `None` after a reset.
    pub query: Option<String>,
    pub phase: SearchPhase,
    pub snapshot: Arc<ResultSnapshot>,
}

impl StoreState {
    fn initial() -> Self {
        Self {
            generation: 0,
            epoch: 0,
            query: None,
            phase: SearchPhase::Idle,
            snapshot: Arc::new(ResultSnapshot::empty()),
        }
    }
}

/// Holds the current snapshot and hands out generations.
///
/// A snapshot is only accepted for the latest generation handed out and for
/// the clear epoch its query was typed in, so a join that was superseded (by
/// a newer query or by clearing the input) can never overwrite what the
/// user sees. Both checks run under the channel's write lock.
pub struct ResultStore {
    tx: watch::Sender<StoreState>,
    generation: AtomicU64,
}

impl ResultStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(StoreState::initial());
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> StoreState {
        self.tx.borrow().clone()
    }

    /// Latest generation handed out.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Starts a new generation, superseding every earlier one.
    pub fn begin_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current clear epoch. Queries are tagged with it when typed.
    pub fn epoch(&self) -> u64 {
        self.tx.borrow().epoch
    }

    /// Clears the snapshot, starts a new epoch and supersedes every
    /// in-flight join.
    pub fn reset(&self) -> u64 {
        let generation = self.begin_generation();
        self.tx.send_modify(|state| {
            let epoch = state.epoch + 1;
            *state = StoreState {
                generation,
                epoch,
                ..StoreState::initial()
            };
        });
        generation
    }

    /// Publishes a joined snapshot. Returns `false` if `generation` is stale
    /// or the input was cleared since the query was typed in `epoch`.
    pub fn publish(
        &self,
        generation: u64,
        epoch: u64,
        query: &str,
        snapshot: ResultSnapshot,
    ) -> bool {
        self.tx.send_if_modified(|state| {
            if state.epoch != epoch
                || generation != self.latest_generation()
                || generation <= state.generation
            {
                return false;
            }
            *state = StoreState {
                generation,
                epoch,
                query: Some(query.to_string()),
                phase: SearchPhase::Settled,
                snapshot: Arc::new(snapshot),
            };
            true
        })
    }

    /// Updates the phase only, leaving the snapshot untouched.
    pub fn set_phase(&self, phase: SearchPhase) -> bool {
        self.tx.send_if_modified(|state| {
            if state.phase == phase {
                return false;
            }
            state.phase = phase;
            true
        })
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}
