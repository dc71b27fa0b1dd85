//! Search modal controller.
//!
//! Owns the input value and the search session for as long as the modal is
//! open. The pipeline only exists between `open` and `close`, so no lookup
//! runs while the modal is hidden.

use std::sync::Arc;

use log::debug;

use super::backend::SearchBackend;
use super::config::SearchConfig;
use super::display::{sections, ResultSection, SearchOption, SeeAllLink};
use super::errors::SearchError;
use super::routes::submit_path;
use super::session::SearchSession;
use super::store::StoreState;

/// A key press as seen by the global shortcut handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub meta: bool,
    pub ctrl: bool,
}

impl KeyPress {
    /// ⌘K on macOS, Ctrl+K elsewhere.
    pub fn is_search_shortcut(&self) -> bool {
        self.key.eq_ignore_ascii_case(&'k') && (self.meta || self.ctrl)
    }
}

pub struct SearchModal {
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
    session: Option<SearchSession>,
    query: String,
}

impl SearchModal {
    pub fn new(backend: Arc<dyn SearchBackend>, config: SearchConfig) -> Self {
        Self {
            backend,
            config,
            session: None,
            query: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens the modal with an empty input and a fresh pipeline.
    pub fn open(&mut self) {
        if self.session.is_some() {
            return;
        }
        self.query.clear();
        self.session = Some(SearchSession::open(
            Arc::clone(&self.backend),
            self.config,
        ));
    }

    /// Closes the modal, cancelling any pending search.
    pub async fn close(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
        self.query.clear();
    }

    pub async fn toggle(&mut self) {
        if self.is_open() {
            self.close().await;
        } else {
            self.open();
        }
    }

    /// Handles a global key press. Returns `true` if it was consumed.
    pub async fn handle_key(&mut self, key: KeyPress) -> bool {
        if !key.is_search_shortcut() {
            return false;
        }
        self.toggle().await;
        true
    }

    /// Replaces the input value, as an `onChange` handler would.
    pub fn input(&mut self, value: &str) -> Result<(), SearchError> {
        let session = self.session.as_ref().ok_or(SearchError::SessionClosed)?;
        self.query = value.to_string();
        session.set_query(value)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> Option<StoreState> {
        self.session.as_ref().map(SearchSession::state)
    }

    /// Sections to render for the current snapshot. "See all" links point at
    /// the query the snapshot was produced for.
    pub fn sections(&self) -> Vec<ResultSection> {
        let Some(state) = self.state() else {
            return Vec::new();
        };
        let query = state.query.as_deref().unwrap_or(self.query.as_str());
        sections(&state.snapshot, query, self.config.result_limit)
    }

    /// Submits the form without picking a result. Returns where to navigate,
    /// or `None` if the modal is closed or the input is blank.
    pub async fn submit(&mut self) -> Option<String> {
        if !self.is_open() || self.query.trim().is_empty() {
            return None;
        }
        let route = submit_path(self.query.trim());
        debug!("Search submitted, navigating to {}", route);
        self.close().await;
        Some(route)
    }

    /// Picks a result row. Returns where to navigate.
    pub async fn select(&mut self, option: &SearchOption) -> String {
        let href = option.href.clone();
        self.close().await;
        href
    }

    /// Follows a "see all" link.
    pub async fn see_all(&mut self, link: &SeeAllLink) -> String {
        let href = link.href.clone();
        self.close().await;
        href
    }
}
