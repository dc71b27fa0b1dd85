//! Search domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result category shown as a section of the search modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Players,
    Guilds,
    Patrons,
    Quests,
}

impl SearchCategory {
    /// All categories in display order.
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::Players,
        SearchCategory::Guilds,
        SearchCategory::Patrons,
        SearchCategory::Quests,
    ];

    /// URL segment used by the full search pages (`/search/<slug>`).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Guilds => "guilds",
            Self::Patrons => "patrons",
            Self::Quests => "quests",
        }
    }

    /// Section title rendered above the results.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Guilds => "Guilds",
            Self::Patrons => "Patrons",
            Self::Quests => "Quests",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A player as returned by the player search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ethereum_address: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Player {
    /// Human readable name: the profile name, else a shortened address.
    pub fn display_name(&self) -> Option<String> {
        non_blank(self.name.as_deref())
            .map(str::to_string)
            .or_else(|| {
                non_blank(self.ethereum_address.as_deref()).map(shorten_address)
            })
    }

    /// Username if one has been claimed.
    pub fn username(&self) -> Option<&str> {
        non_blank(self.username.as_deref())
    }
}

/// A patron is a player holding pSEED.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patron {
    #[serde(flatten)]
    pub player: Player,
    #[serde(default)]
    pub pseed_balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: String,
    pub guildname: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Aggregate of the four category result lists for one settled query.
///
/// Replaced as a whole on every completed join; never patched per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub players: Vec<Player>,
    pub guilds: Vec<Guild>,
    pub patrons: Vec<Patron>,
    pub quests: Vec<Quest>,
}

impl ResultSnapshot {
    /// Snapshot with all four lists empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        SearchCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Number of results held for a category.
    pub fn count(&self, category: SearchCategory) -> usize {
        match category {
            SearchCategory::Players => self.players.len(),
            SearchCategory::Guilds => self.guilds.len(),
            SearchCategory::Patrons => self.patrons.len(),
            SearchCategory::Quests => self.quests.len(),
        }
    }

    /// Truncates every list to `limit` entries.
    pub fn bounded(mut self, limit: usize) -> Self {
        self.players.truncate(limit);
        self.guilds.truncate(limit);
        self.patrons.truncate(limit);
        self.quests.truncate(limit);
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `0x1234567890abcdef...` -> `0x1234…cdef`
fn shorten_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}…{}", head, tail),
        _ => address.to_string(),
    }
}
