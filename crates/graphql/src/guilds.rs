//! [`GuildRepositoryTrait`] over a GraphQL insert.

use async_trait::async_trait;
use log::debug;
use metafam_core::guilds::{GuildError, GuildRepositoryTrait, ValidGuild, ValidGuildDao};
use metafam_core::search::Guild;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::GraphQlClient;
use crate::queries::SUBMIT_GUILD;

/// Unverified guilds wait for review before they are listed.
const PENDING_STATUS: &str = "PENDING";

#[derive(Serialize)]
struct Rows<T> {
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscordMetadata<'a> {
    administrator_role_ids: &'a [String],
    membership_role_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuildMetadataInsert<'a> {
    discord_metadata: DiscordMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuildInsert<'a> {
    guildname: &'a str,
    name: &'a str,
    description: Option<&'a str>,
    discord_invite_url: Option<&'a str>,
    join_url: Option<&'a str>,
    logo: Option<&'a str>,
    website_url: Option<&'a str>,
    twitter_url: Option<&'a str>,
    github_url: Option<&'a str>,
    #[serde(rename = "type")]
    guild_type: &'a str,
    status: &'static str,
    daos: Rows<&'a [ValidGuildDao]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Rows<GuildMetadataInsert<'a>>>,
}

impl<'a> GuildInsert<'a> {
    fn new(guild: &'a ValidGuild) -> Self {
        let has_roles =
            !guild.discord_admin_roles.is_empty() || !guild.discord_membership_roles.is_empty();
        let metadata = has_roles.then(|| Rows {
            data: GuildMetadataInsert {
                discord_metadata: DiscordMetadata {
                    administrator_role_ids: &guild.discord_admin_roles,
                    membership_role_ids: &guild.discord_membership_roles,
                },
            },
        });

        Self {
            guildname: &guild.guildname,
            name: &guild.name,
            description: guild.description.as_deref(),
            discord_invite_url: guild.discord_invite_url.as_deref(),
            join_url: guild.join_url.as_deref(),
            logo: guild.logo_url.as_deref(),
            website_url: guild.website_url.as_deref(),
            twitter_url: guild.twitter_url.as_deref(),
            github_url: guild.github_url.as_deref(),
            guild_type: guild.guild_type.as_str(),
            status: PENDING_STATUS,
            daos: Rows { data: &guild.daos },
            metadata,
        }
    }
}

#[derive(Deserialize)]
struct InsertedGuild {
    insert_guild_one: Option<Guild>,
}

pub struct GraphQlGuildRepository {
    client: GraphQlClient,
}

impl GraphQlGuildRepository {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GuildRepositoryTrait for GraphQlGuildRepository {
    async fn insert_guild(&self, guild: ValidGuild) -> Result<Guild, GuildError> {
        let object = GuildInsert::new(&guild);
        let inserted: InsertedGuild = self
            .client
            .execute(SUBMIT_GUILD, json!({ "object": object }))
            .await?;
        let stored = inserted
            .insert_guild_one
            .ok_or_else(|| GuildError::Backend("insert returned no row".to_string()))?;
        debug!("Inserted guild {} ({})", stored.guildname, stored.id);
        Ok(stored)
    }
}
