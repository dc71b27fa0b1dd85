//! [`LinkRepositoryTrait`] over GraphQL mutations.

use async_trait::async_trait;
use log::debug;
use metafam_core::links::{LinkError, LinkRepositoryTrait, PlayerLink, ValidLink};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::GraphQlClient;
use crate::queries::{ADD_PLAYER_LINK, DELETE_PLAYER_LINK, PLAYER_LINKS, UPDATE_PLAYER_LINK};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    player_id: Option<&'a str>,
    #[serde(flatten)]
    link: &'a ValidLink,
}

#[derive(Deserialize)]
struct LinkRows {
    link: Vec<PlayerLink>,
}

#[derive(Deserialize)]
struct InsertedLink {
    insert_link_one: Option<PlayerLink>,
}

#[derive(Deserialize)]
struct UpdatedLink {
    update_link_by_pk: Option<PlayerLink>,
}

#[derive(Deserialize)]
struct AffectedRows {
    affected_rows: usize,
}

#[derive(Deserialize)]
struct DeletedLinks {
    delete_link: AffectedRows,
}

pub struct GraphQlLinkRepository {
    client: GraphQlClient,
}

impl GraphQlLinkRepository {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkRepositoryTrait for GraphQlLinkRepository {
    async fn load_links(&self, player_id: &str) -> Result<Vec<PlayerLink>, LinkError> {
        let rows: LinkRows = self
            .client
            .execute(PLAYER_LINKS, json!({ "playerId": player_id }))
            .await?;
        debug!("Loaded {} link(s) for player {}", rows.link.len(), player_id);
        Ok(rows.link)
    }

    async fn insert_link(&self, player_id: &str, link: ValidLink) -> Result<PlayerLink, LinkError> {
        let variables = LinkVariables {
            id: None,
            player_id: Some(player_id),
            link: &link,
        };
        let inserted: InsertedLink = self.client.execute(ADD_PLAYER_LINK, variables).await?;
        inserted
            .insert_link_one
            .ok_or_else(|| LinkError::Backend("insert returned no row".to_string()))
    }

    async fn update_link(&self, link_id: &str, link: ValidLink) -> Result<PlayerLink, LinkError> {
        let variables = LinkVariables {
            id: Some(link_id),
            player_id: None,
            link: &link,
        };
        let updated: UpdatedLink = self.client.execute(UPDATE_PLAYER_LINK, variables).await?;
        updated
            .update_link_by_pk
            .ok_or_else(|| LinkError::NotFound(link_id.to_string()))
    }

    async fn delete_link(&self, link_id: &str) -> Result<usize, LinkError> {
        let deleted: DeletedLinks = self
            .client
            .execute(DELETE_PLAYER_LINK, json!({ "id": link_id }))
            .await?;
        Ok(deleted.delete_link.affected_rows)
    }
}
