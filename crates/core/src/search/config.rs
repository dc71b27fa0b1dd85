//! Tuning knobs for a search session.

use std::time::Duration;

use crate::constants::{LOOKUP_TIMEOUT, SEARCH_DEBOUNCE, SEARCH_RESULT_LIMIT};

/// Search session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before lookups run.
    pub debounce: Duration,
    /// Results kept per category; also the "see all" threshold.
    pub result_limit: usize,
    /// Upper bound on each category lookup.
    pub lookup_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            result_limit: SEARCH_RESULT_LIMIT,
            lookup_timeout: LOOKUP_TIMEOUT,
        }
    }
}

impl SearchConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// A limit of zero would hide every result, so it is clamped to one.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit.max(1);
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}
