//! Turns a snapshot into the sections and option rows of the search modal.

use serde::Serialize;

use crate::constants::UNKNOWN_PLAYER_LABEL;

use super::model::{Guild, Patron, Player, Quest, ResultSnapshot, SearchCategory};
use super::routes::{guild_path, player_path, quest_path, see_all_path};

/// One selectable result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOption {
    pub key: String,
    /// Text shown on the row.
    pub text: String,
    /// Name used for the avatar fallback.
    pub name: String,
    pub image: Option<String>,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeeAllLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSection {
    pub category: SearchCategory,
    pub title: String,
    pub options: Vec<SearchOption>,
    pub see_all: Option<SeeAllLink>,
}

pub fn player_option(player: &Player) -> SearchOption {
    let name = player
        .display_name()
        .unwrap_or_else(|| UNKNOWN_PLAYER_LABEL.to_string());
    let text = player
        .username()
        .map(str::to_string)
        .unwrap_or_else(|| name.clone());

    SearchOption {
        key: player.id.clone(),
        text,
        name,
        image: player.profile_image_url.clone(),
        href: player_path(player),
    }
}

pub fn patron_option(patron: &Patron) -> SearchOption {
    player_option(&patron.player)
}

pub fn guild_option(guild: &Guild) -> SearchOption {
    SearchOption {
        key: guild.id.clone(),
        text: guild.name.clone(),
        name: guild.name.clone(),
        image: guild.logo.clone(),
        href: guild_path(guild),
    }
}

pub fn quest_option(quest: &Quest) -> SearchOption {
    SearchOption {
        key: quest.id.clone(),
        text: quest.title.clone(),
        name: quest.title.clone(),
        image: quest.image.clone(),
        href: quest_path(quest),
    }
}

/// Sections for every non-empty category, in display order.
pub fn sections(snapshot: &ResultSnapshot, query: &str, limit: usize) -> Vec<ResultSection> {
    SearchCategory::ALL
        .iter()
        .filter_map(|&category| {
            let options: Vec<SearchOption> = match category {
                SearchCategory::Players => snapshot.players.iter().map(player_option).collect(),
                SearchCategory::Guilds => snapshot.guilds.iter().map(guild_option).collect(),
                SearchCategory::Patrons => snapshot.patrons.iter().map(patron_option).collect(),
                SearchCategory::Quests => snapshot.quests.iter().map(quest_option).collect(),
            };
            if options.is_empty() {
                return None;
            }

            let see_all = see_all_path(category, options.len(), limit, query).map(|href| {
                SeeAllLink {
                    label: format!("See All {}", category.title()),
                    href,
                }
            });

            Some(ResultSection {
                category,
                title: category.title().to_string(),
                options,
                see_all,
            })
        })
        .collect()
}
