//! MetaFam Core - header search pipeline and profile link domain.
//!
//! This crate contains the client-side logic behind the platform header:
//! the incremental search aggregator that feeds the search modal, and the
//! player link service used by profile sections. The `guilds` module holds
//! the guild submission form. It is transport-agnostic and defines traits
//! that are implemented by the `graphql` crate.

pub mod constants;
pub mod errors;
pub mod guilds;
pub mod links;
pub mod search;

// Re-export the search surface most callers need
pub use search::{
    ResultSnapshot, SearchBackend, SearchCategory, SearchConfig, SearchModal, SearchPhase,
    SearchSession, StoreState,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
