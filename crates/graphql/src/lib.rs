//! GraphQL data access for the MetaFam client core.
//!
//! Implements [`metafam_core::SearchBackend`],
//! [`metafam_core::links::LinkRepositoryTrait`] and
//! [`metafam_core::guilds::GuildRepositoryTrait`] on top of a Hasura-style
//! GraphQL endpoint.

mod client;
mod errors;
mod guilds;
mod links;
mod queries;
mod search;

pub use client::GraphQlClient;
pub use errors::GraphQlError;
pub use guilds::GraphQlGuildRepository;
pub use links::GraphQlLinkRepository;
pub use search::{ilike_pattern, GraphQlSearchBackend};
