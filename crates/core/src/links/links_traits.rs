use async_trait::async_trait;

use crate::errors::Result;
use crate::links::links_errors::LinkError;
use crate::links::links_model::{NewPlayerLink, PlayerLink, ValidLink};

/// Trait for link storage operations
#[async_trait]
pub trait LinkRepositoryTrait: Send + Sync {
    async fn load_links(&self, player_id: &str) -> std::result::Result<Vec<PlayerLink>, LinkError>;
    async fn insert_link(
        &self,
        player_id: &str,
        link: ValidLink,
    ) -> std::result::Result<PlayerLink, LinkError>;
    async fn update_link(
        &self,
        link_id: &str,
        link: ValidLink,
    ) -> std::result::Result<PlayerLink, LinkError>;
    async fn delete_link(&self, link_id: &str) -> std::result::Result<usize, LinkError>;
}

/// Trait for link service operations
#[async_trait]
pub trait LinkServiceTrait: Send + Sync {
    async fn get_links(&self, player_id: &str) -> Result<Vec<PlayerLink>>;
    async fn add_link(&self, player_id: &str, input: NewPlayerLink) -> Result<PlayerLink>;
    async fn update_link(&self, link_id: &str, input: NewPlayerLink) -> Result<PlayerLink>;
    async fn delete_link(&self, link_id: &str) -> Result<()>;
}
