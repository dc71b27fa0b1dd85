use async_trait::async_trait;

use crate::errors::Result;
use crate::guilds::guilds_errors::GuildError;
use crate::guilds::guilds_model::{NewGuild, ValidGuild};
use crate::search::Guild;

/// Trait for guild storage operations
#[async_trait]
pub trait GuildRepositoryTrait: Send + Sync {
    async fn insert_guild(&self, guild: ValidGuild) -> std::result::Result<Guild, GuildError>;
}

/// Trait for guild service operations
#[async_trait]
pub trait GuildServiceTrait: Send + Sync {
    async fn submit_guild(&self, input: NewGuild) -> Result<Guild>;
}
