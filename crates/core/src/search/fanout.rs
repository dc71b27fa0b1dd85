//! Concurrent category lookups joined into a single snapshot.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::backend::SearchBackend;
use super::errors::SearchError;
use super::model::{ResultSnapshot, SearchCategory};

/// Runs the four category lookups for `query` concurrently and waits for all
/// of them before building the snapshot.
///
/// A lookup that fails or exceeds `timeout` contributes an empty list; it
/// never voids the other three. Every list is bounded to `limit`.
pub async fn fan_out(
    backend: Arc<dyn SearchBackend>,
    query: String,
    limit: usize,
    timeout: Duration,
) -> ResultSnapshot {
    debug!("Dispatching category lookups for '{}'", query);

    let (players, guilds, patrons, quests) = futures::join!(
        settle(
            SearchCategory::Players,
            &query,
            timeout,
            backend.search_players(&query)
        ),
        settle(
            SearchCategory::Guilds,
            &query,
            timeout,
            backend.search_guilds(&query, limit)
        ),
        settle(
            SearchCategory::Patrons,
            &query,
            timeout,
            backend.search_patrons(&query, limit)
        ),
        settle(
            SearchCategory::Quests,
            &query,
            timeout,
            backend.search_quests(&query, limit)
        ),
    );

    ResultSnapshot {
        players,
        guilds,
        patrons,
        quests,
    }
    .bounded(limit)
}

/// Awaits one lookup, folding errors and timeouts into an empty list.
async fn settle<T, F>(category: SearchCategory, query: &str, timeout: Duration, lookup: F) -> Vec<T>
where
    F: Future<Output = Result<Vec<T>, SearchError>>,
{
    let error = match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(items)) => {
            debug!("{} lookup for '{}' returned {} item(s)", category, query, items.len());
            return items;
        }
        Ok(Err(e)) => e,
        Err(_) => SearchError::Timeout {
            category: category.to_string(),
        },
    };

    warn!("Treating {} as empty for '{}': {}", category, query, error);
    Vec::new()
}
