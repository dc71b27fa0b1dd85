//! Navigation targets reachable from the search modal.

use urlencoding::encode;

use super::model::{Guild, Player, Quest, SearchCategory};

/// Full search page for a category: `/search/<category>?q=<query>`.
pub fn search_path(category: SearchCategory, query: &str) -> String {
    format!("/search/{}?q={}", category.slug(), encode(query))
}

/// Target of submitting the search form without picking a result.
pub fn submit_path(query: &str) -> String {
    search_path(SearchCategory::Players, query)
}

/// "See all" target, offered only once a category has filled its limit.
pub fn see_all_path(
    category: SearchCategory,
    count: usize,
    limit: usize,
    query: &str,
) -> Option<String> {
    (count >= limit).then(|| search_path(category, query))
}

/// Profile page of a player (or patron), keyed by username when claimed.
pub fn player_path(player: &Player) -> String {
    let key = player
        .username()
        .or_else(|| {
            player
                .ethereum_address
                .as_deref()
                .filter(|a| !a.trim().is_empty())
        })
        .unwrap_or(player.id.as_str());
    format!("/player/{}", encode(key))
}

pub fn guild_path(guild: &Guild) -> String {
    format!("/guild/{}", encode(&guild.guildname))
}

pub fn quest_path(quest: &Quest) -> String {
    format!("/quest/{}", encode(&quest.id))
}
