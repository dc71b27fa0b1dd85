//! Core error types for the MetaFam client core.
//!
//! Transport-specific errors (HTTP, GraphQL envelopes) are converted into
//! these types by the `graphql` crate, which keeps this crate free of any
//! network dependency.

use thiserror::Error;

use crate::constants::REQUIRED_FIELD_MESSAGE;
use crate::guilds::GuildError;
use crate::links::LinkError;
use crate::search::SearchError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client core.
///
/// None of these are fatal to the running process: search errors degrade to
/// empty results, link and guild errors are handed back to the form that triggered them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Link operation failed: {0}")]
    Link(#[from] LinkError),

    #[error("Guild submission failed: {0}")]
    Guild(#[from] GuildError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors surfaced inline next to the offending form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidField { field, .. } => field,
        }
    }

    /// Message rendered under the field.
    pub fn message(&self) -> &str {
        match self {
            Self::MissingField(_) => REQUIRED_FIELD_MESSAGE,
            Self::InvalidField { message, .. } => message,
        }
    }
}
