//! In-memory search backend for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::backend::SearchBackend;
use super::errors::SearchError;
use super::model::{Guild, Patron, Player, Quest, SearchCategory};

#[derive(Default)]
struct MockState {
    calls: Vec<(SearchCategory, String)>,
    completed: Vec<(SearchCategory, String)>,
    query_delays: HashMap<String, Duration>,
    category_delays: HashMap<SearchCategory, Duration>,
    failures: HashSet<SearchCategory>,
}

/// Deterministic backend: five players, `limit` guilds, one patron and two
/// quests per query, each named after the query.
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every lookup for `query` sleeps for `delay` before answering.
    pub(crate) fn with_query_delay(self, query: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .query_delays
            .insert(query.to_string(), delay);
        self
    }

    pub(crate) fn with_category_delay(self, category: SearchCategory, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .category_delays
            .insert(category, delay);
        self
    }

    pub(crate) fn failing(self, category: SearchCategory) -> Self {
        self.state.lock().unwrap().failures.insert(category);
        self
    }

    /// Queries that reached the backend, in dispatch order, one per join.
    pub(crate) fn dispatched_queries(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(category, _)| *category == SearchCategory::Players)
            .map(|(_, query)| query.clone())
            .collect()
    }

    pub(crate) fn calls_for(&self, query: &str) -> Vec<SearchCategory> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(_, q)| q == query)
            .map(|(category, _)| *category)
            .collect()
    }

    pub(crate) fn completed(&self) -> Vec<(SearchCategory, String)> {
        self.state.lock().unwrap().completed.clone()
    }

    async fn lookup(&self, category: SearchCategory, query: &str) -> Result<(), SearchError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.calls.push((category, query.to_string()));
            let by_query = state.query_delays.get(query).copied();
            let by_category = state.category_delays.get(&category).copied();
            by_query.or(by_category)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.completed.push((category, query.to_string()));
        if state.failures.contains(&category) {
            return Err(SearchError::LookupFailed {
                category: category.to_string(),
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn player(query: &str, index: usize) -> Player {
    Player {
        id: format!("{}-player-{}", query, index),
        username: Some(format!("{}{}", query, index)),
        name: Some(format!("{} Player {}", query, index)),
        ..Default::default()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search_players(&self, query: &str) -> Result<Vec<Player>, SearchError> {
        self.lookup(SearchCategory::Players, query).await?;
        Ok((0..5).map(|i| player(query, i)).collect())
    }

    async fn search_guilds(&self, query: &str, limit: usize) -> Result<Vec<Guild>, SearchError> {
        self.lookup(SearchCategory::Guilds, query).await?;
        Ok((0..limit)
            .map(|i| Guild {
                id: format!("{}-guild-{}", query, i),
                guildname: format!("{}-guild-{}", query, i),
                name: format!("{} Guild {}", query, i),
                logo: None,
            })
            .collect())
    }

    async fn search_patrons(
        &self,
        query: &str,
        _limit: usize,
    ) -> Result<Vec<Patron>, SearchError> {
        self.lookup(SearchCategory::Patrons, query).await?;
        Ok(vec![Patron {
            player: player(query, 99),
            pseed_balance: Some(10.0),
        }])
    }

    async fn search_quests(&self, query: &str, _limit: usize) -> Result<Vec<Quest>, SearchError> {
        self.lookup(SearchCategory::Quests, query).await?;
        Ok((0..2)
            .map(|i| Quest {
                id: format!("{}-quest-{}", query, i),
                title: format!("{} Quest {}", query, i),
                image: None,
            })
            .collect())
    }
}
