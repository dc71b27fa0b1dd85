//! Pipeline worker driving one search session.
//!
//! Receives raw query events from the session, debounces them, gates
//! repeats, fans out lookups and publishes joined snapshots to the store.
//! The loop is a small state machine over three event sources: the query
//! channel, the debounce deadline and the in-flight join.

use std::sync::Arc;

use futures::future::BoxFuture;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::backend::SearchBackend;
use super::config::SearchConfig;
use super::fanout::fan_out;
use super::gate::QueryGate;
use super::model::ResultSnapshot;
use super::store::{ResultStore, SearchPhase};

/// Events sent from the session to its worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryEvent {
    /// A non-empty, trimmed query value, tagged with the clear epoch it was
    /// typed in.
    Input { query: String, epoch: u64 },
    /// The input was cleared; the store has already been reset.
    Cleared,
}

/// Pipeline state, derived from what the worker is holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PipelineState {
    Idle,
    Debouncing { query: String },
    Dispatched { generation: u64, query: String },
    Settled { generation: u64 },
}

struct PendingQuery {
    query: String,
    epoch: u64,
    deadline: Instant,
}

struct InFlightJoin {
    generation: u64,
    epoch: u64,
    query: String,
    join: BoxFuture<'static, ResultSnapshot>,
}

pub(crate) struct PipelineWorker {
    backend: Arc<dyn SearchBackend>,
    store: Arc<ResultStore>,
    config: SearchConfig,
    gate: QueryGate,
    pending: Option<PendingQuery>,
    in_flight: Option<InFlightJoin>,
    settled: Option<u64>,
}

impl PipelineWorker {
    pub(crate) fn new(
        backend: Arc<dyn SearchBackend>,
        store: Arc<ResultStore>,
        config: SearchConfig,
    ) -> Self {
        Self {
            backend,
            store,
            config,
            gate: QueryGate::new(),
            pending: None,
            in_flight: None,
            settled: None,
        }
    }

    pub(crate) fn state(&self) -> PipelineState {
        if let Some(pending) = &self.pending {
            return PipelineState::Debouncing {
                query: pending.query.clone(),
            };
        }
        if let Some(in_flight) = &self.in_flight {
            return PipelineState::Dispatched {
                generation: in_flight.generation,
                query: in_flight.query.clone(),
            };
        }
        match self.settled {
            Some(generation) => PipelineState::Settled { generation },
            None => PipelineState::Idle,
        }
    }

    /// Runs until the session drops its sender or the task is aborted.
    pub(crate) async fn run(mut self, mut rx: mpsc::UnboundedReceiver<QueryEvent>) {
        debug!("Search pipeline started");

        loop {
            let deadline = self.pending.as_ref().map(|p| p.deadline);
            let has_in_flight = self.in_flight.is_some();

            // queued input and clears always win over an expiring deadline
            tokio::select! {
                biased;

                event = rx.recv() => match event {
                    Some(QueryEvent::Input { query, epoch }) => self.on_input(query, epoch),
                    Some(QueryEvent::Cleared) => self.on_cleared(),
                    None => {
                        debug!("Query stream closed, search pipeline shutting down");
                        return;
                    }
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_quiet_period_elapsed();
                }
                snapshot = join_in_flight(&mut self.in_flight), if has_in_flight => {
                    self.on_join_settled(snapshot);
                }
            }
        }
    }

    fn on_input(&mut self, query: String, epoch: u64) {
        // every keystroke restarts the quiet period
        self.pending = Some(PendingQuery {
            query,
            epoch,
            deadline: Instant::now() + self.config.debounce,
        });
        self.sync_phase();
    }

    fn on_cleared(&mut self) {
        self.pending = None;
        if let Some(in_flight) = self.in_flight.take() {
            debug!(
                "Input cleared, dropping join for '{}' (generation {})",
                in_flight.query, in_flight.generation
            );
        }
        self.gate.reset();
        self.settled = None;
        self.sync_phase();
    }

    fn on_quiet_period_elapsed(&mut self) {
        let Some(PendingQuery { query, epoch, .. }) = self.pending.take() else {
            return;
        };

        if epoch != self.store.epoch() {
            debug!("Dropping '{}', the input was cleared after it was typed", query);
            self.sync_phase();
            return;
        }

        if !self.gate.admit(&query) {
            debug!("Skipping repeated query '{}'", query);
            self.sync_phase();
            return;
        }

        let generation = self.store.begin_generation();
        if let Some(superseded) = self.in_flight.take() {
            debug!(
                "Cancelling join for '{}' (generation {}), superseded by generation {}",
                superseded.query, superseded.generation, generation
            );
        }

        info!("Searching for '{}' (generation {})", query, generation);
        let join = fan_out(
            Arc::clone(&self.backend),
            query.clone(),
            self.config.result_limit,
            self.config.lookup_timeout,
        );
        self.in_flight = Some(InFlightJoin {
            generation,
            epoch,
            query,
            join: Box::pin(join),
        });
        self.sync_phase();
    }

    fn on_join_settled(&mut self, snapshot: ResultSnapshot) {
        let Some(InFlightJoin {
            generation,
            epoch,
            query,
            ..
        }) = self.in_flight.take()
        else {
            return;
        };

        let total = snapshot.total();
        if self.store.publish(generation, epoch, &query, snapshot) {
            debug!(
                "Published {} result(s) for '{}' (generation {})",
                total, query, generation
            );
            self.settled = Some(generation);
        } else {
            debug!(
                "Discarding stale join for '{}' (generation {}, latest {})",
                query,
                generation,
                self.store.latest_generation()
            );
        }
        self.sync_phase();
    }

    fn sync_phase(&self) {
        let phase = match self.state() {
            PipelineState::Idle => SearchPhase::Idle,
            PipelineState::Debouncing { .. } => SearchPhase::Debouncing,
            PipelineState::Dispatched { .. } => SearchPhase::Loading,
            PipelineState::Settled { .. } => SearchPhase::Settled,
        };
        self.store.set_phase(phase);
    }
}

/// Resolves with the in-flight join's snapshot; pends forever when idle.
async fn join_in_flight(in_flight: &mut Option<InFlightJoin>) -> ResultSnapshot {
    match in_flight.as_mut() {
        Some(in_flight) => (&mut in_flight.join).await,
        None => std::future::pending().await,
    }
}
