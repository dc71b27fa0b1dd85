//! Guilds module - submission of unverified guilds from the join form.

mod guilds_errors;
mod guilds_model;
mod guilds_service;
mod guilds_traits;

pub use guilds_errors::GuildError;
pub use guilds_model::{
    checksum_address, is_address, DaoNetwork, GuildType, NewGuild, NewGuildDao, ValidGuild,
    ValidGuildDao,
};
pub use guilds_service::GuildService;
pub use guilds_traits::{GuildRepositoryTrait, GuildServiceTrait};
