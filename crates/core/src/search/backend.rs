//! Lookup collaborators consulted by the search aggregator.

use async_trait::async_trait;

use super::errors::SearchError;
use super::model::{Guild, Patron, Player, Quest};

/// Backend answering the four category lookups of the search modal.
///
/// Each method is called at most once per settled query and the four calls
/// run concurrently. An `Err` only empties its own category.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use metafam_core::search::{Guild, Patron, Player, Quest, SearchBackend, SearchError};
///
/// struct Offline;
///
/// #[async_trait]
/// impl SearchBackend for Offline {
///     async fn search_players(&self, _query: &str) -> Result<Vec<Player>, SearchError> {
///         Err(SearchError::Unavailable("offline".to_string()))
///     }
///
///     // ... guilds, patrons, quests
/// }
/// ```
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Players matching the query. The backend may apply its own cap;
    /// the aggregator bounds the list afterwards.
    async fn search_players(&self, query: &str) -> Result<Vec<Player>, SearchError>;

    /// Guilds matching the query, at most `limit`.
    async fn search_guilds(&self, query: &str, limit: usize) -> Result<Vec<Guild>, SearchError>;

    /// Patrons matching the query, at most `limit`.
    async fn search_patrons(&self, query: &str, limit: usize)
        -> Result<Vec<Patron>, SearchError>;

    /// Quests matching the query, at most `limit`.
    async fn search_quests(&self, query: &str, limit: usize) -> Result<Vec<Quest>, SearchError>;
}
