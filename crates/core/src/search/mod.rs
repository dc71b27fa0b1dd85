//! Header search module.
//!
//! This module implements the incremental search aggregator behind the
//! header search modal:
//!
//! - [`model`] - Players, guilds, patrons, quests and the joined snapshot
//! - [`backend`] - The lookup trait implemented by data-fetching crates
//! - [`gate`] - Empty-input filter and the distinct-value gate
//! - [`fanout`] - Concurrent category lookups with a barrier join
//! - [`store`] - Generation-checked result store read by the render path
//! - [`session`] - One live pipeline per modal opening
//! - [`modal`] - Modal controller (open/close, input, submit, select)
//! - [`routes`] / [`display`] - Navigation targets and render rows
//!
//! # Pipeline
//!
//! ```text
//! keystroke ─▶ SearchSession ─▶ empty? ──yes──▶ ResultStore::reset
//!                                 │ no
//!                                 ▼
//!                     debounce (300ms, trailing edge)
//!                                 ▼
//!                     QueryGate (skip repeated query)
//!                                 ▼
//!            fan_out: players │ guilds │ patrons │ quests
//!                                 ▼
//!           join ─▶ ResultStore::publish(generation, epoch)
//! ```

pub mod backend;
pub mod config;
pub mod display;
pub mod errors;
pub mod fanout;
pub mod gate;
pub mod modal;
pub mod model;
pub mod routes;
pub mod session;
pub mod store;
mod worker;

#[cfg(test)]
mod testing;


pub use backend::SearchBackend;
pub use config::SearchConfig;
pub use display::{ResultSection, SearchOption, SeeAllLink};
pub use errors::SearchError;
pub use fanout::fan_out;
pub use gate::{normalize_query, QueryGate};
pub use modal::{KeyPress, SearchModal};
pub use model::{Guild, Patron, Player, Quest, ResultSnapshot, SearchCategory};
pub use session::SearchSession;
pub use store::{ResultStore, SearchPhase, StoreState};
