//! Errors produced by search lookups and sessions.

use thiserror::Error;

/// Errors that can occur while looking up search results.
///
/// The aggregator never surfaces these to the user: a failed category is
/// logged and rendered as an empty list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A category lookup was rejected by the backend.
    #[error("Lookup failed: {category} - {message}")]
    LookupFailed {
        /// Category slug of the failed lookup
        category: String,
        /// Error message from the backend
        message: String,
    },

    /// A category lookup did not settle within the configured timeout.
    #[error("Lookup timed out: {category}")]
    Timeout {
        /// Category slug of the timed out lookup
        category: String,
    },

    /// The backend could not be reached at all.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The session was closed before the operation could run.
    #[error("Search session is closed")]
    SessionClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SearchError::LookupFailed {
            category: "patrons".to_string(),
            message: "field 'player' not found".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Lookup failed: patrons - field 'player' not found"
        );
        assert_eq!(
            format!("{}", SearchError::SessionClosed),
            "Search session is closed"
        );
    }
}
