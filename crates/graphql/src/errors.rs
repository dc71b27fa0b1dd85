use metafam_core::guilds::GuildError;
use metafam_core::links::LinkError;
use metafam_core::search::{SearchCategory, SearchError};
use thiserror::Error;

/// Errors that can occur while talking to the GraphQL endpoint.
#[derive(Error, Debug)]
pub enum GraphQlError {
    /// Transport-level failure, including client-side timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("GraphQL endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried an `errors` array.
    #[error("GraphQL errors: {0}")]
    Response(String),

    /// The response had neither `data` nor `errors`.
    #[error("GraphQL response contained no data")]
    MissingData,

    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid GraphQL client configuration: {0}")]
    Config(String),
}

impl GraphQlError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GraphQlError::Http(e) => e.is_timeout() || e.is_connect(),
            GraphQlError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Maps the error onto the search pipeline's error for one category.
    pub fn for_category(self, category: SearchCategory) -> SearchError {
        match self {
            GraphQlError::Http(e) if e.is_timeout() => SearchError::Timeout {
                category: category.to_string(),
            },
            other if other.is_transient() => SearchError::Unavailable(other.to_string()),
            other => SearchError::LookupFailed {
                category: category.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<GraphQlError> for LinkError {
    fn from(err: GraphQlError) -> Self {
        LinkError::Backend(err.to_string())
    }
}

impl From<GraphQlError> for GuildError {
    fn from(err: GraphQlError) -> Self {
        GuildError::Backend(err.to_string())
    }
}
