//! [`SearchBackend`] over the platform's GraphQL API.

use async_trait::async_trait;
use log::debug;
use metafam_core::search::{
    Guild, Patron, Player, Quest, SearchBackend, SearchCategory, SearchError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::GraphQlClient;
use crate::queries::{SEARCH_GUILDS, SEARCH_PATRONS, SEARCH_PLAYERS, SEARCH_QUESTS};

/// Upper bound on player rows fetched per search; the pipeline keeps the
/// first few.
const PLAYER_FETCH_LIMIT: usize = 12;

/// Case-insensitive substring pattern for `_ilike`, with the input's own
/// wildcards escaped.
pub fn ilike_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Serialize)]
struct SearchVariables {
    search: String,
    limit: usize,
}

impl SearchVariables {
    fn new(query: &str, limit: usize) -> Self {
        Self {
            search: ilike_pattern(query),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRow {
    username: Option<String>,
    name: Option<String>,
    #[serde(rename = "profileImageURL")]
    profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRow {
    id: String,
    ethereum_address: Option<String>,
    profile: Option<ProfileRow>,
    #[serde(rename = "token_balances", default)]
    token_balances: Option<TokenBalanceRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenBalanceRow {
    /// Postgres numerics may arrive as strings.
    p_seed_balance: Option<Value>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        let profile = row.profile;
        let (username, name, profile_image_url) = match profile {
            Some(p) => (p.username, p.name, p.profile_image_url),
            None => (None, None, None),
        };
        Player {
            id: row.id,
            username,
            name,
            ethereum_address: row.ethereum_address,
            profile_image_url,
        }
    }
}

impl From<PlayerRow> for Patron {
    fn from(mut row: PlayerRow) -> Self {
        let pseed_balance = row
            .token_balances
            .take()
            .and_then(|b| b.p_seed_balance)
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            });
        Patron {
            player: row.into(),
            pseed_balance,
        }
    }
}

#[derive(Deserialize)]
struct PlayerRows {
    player: Vec<PlayerRow>,
}

#[derive(Deserialize)]
struct GuildRows {
    guild: Vec<Guild>,
}

#[derive(Deserialize)]
struct QuestRows {
    quest: Vec<Quest>,
}

/// Category lookups backed by GraphQL queries.
pub struct GraphQlSearchBackend {
    client: GraphQlClient,
}

impl GraphQlSearchBackend {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for GraphQlSearchBackend {
    async fn search_players(&self, query: &str) -> Result<Vec<Player>, SearchError> {
        let rows: PlayerRows = self
            .client
            .execute(SEARCH_PLAYERS, SearchVariables::new(query, PLAYER_FETCH_LIMIT))
            .await
            .map_err(|e| e.for_category(SearchCategory::Players))?;
        debug!("Player search '{}' returned {} row(s)", query, rows.player.len());
        Ok(rows.player.into_iter().map(Player::from).collect())
    }

    async fn search_guilds(&self, query: &str, limit: usize) -> Result<Vec<Guild>, SearchError> {
        let rows: GuildRows = self
            .client
            .execute(SEARCH_GUILDS, SearchVariables::new(query, limit))
            .await
            .map_err(|e| e.for_category(SearchCategory::Guilds))?;
        Ok(rows.guild)
    }

    async fn search_patrons(&self, query: &str, limit: usize) -> Result<Vec<Patron>, SearchError> {
        let rows: PlayerRows = self
            .client
            .execute(SEARCH_PATRONS, SearchVariables::new(query, limit))
            .await
            .map_err(|e| e.for_category(SearchCategory::Patrons))?;
        Ok(rows.player.into_iter().map(Patron::from).collect())
    }

    async fn search_quests(&self, query: &str, limit: usize) -> Result<Vec<Quest>, SearchError> {
        let rows: QuestRows = self
            .client
            .execute(SEARCH_QUESTS, SearchVariables::new(query, limit))
            .await
            .map_err(|e| e.for_category(SearchCategory::Quests))?;
        Ok(rows.quest)
    }
}
