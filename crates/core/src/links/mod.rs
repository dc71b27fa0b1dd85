//! Links module - player profile links, their validation and service.

mod links_errors;
mod links_model;
mod links_service;
mod links_traits;

pub use links_errors::LinkError;
pub use links_model::{LinkType, NewPlayerLink, PlayerLink, ValidLink};
pub use links_service::LinkService;
pub use links_traits::{LinkRepositoryTrait, LinkServiceTrait};
