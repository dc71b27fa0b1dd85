use thiserror::Error;

/// Errors raised by link mutations.
///
/// The `*Failed` variants are handed back to the form submission handler
/// and rendered as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Unable to load links. Error: {0}")]
    LoadFailed(String),

    #[error("Unable to add link. Error: {0}")]
    AddFailed(String),

    #[error("Unable to update link. Error: {0}")]
    UpdateFailed(String),

    #[error("Unable to delete link. Error: {0}")]
    DeleteFailed(String),

    #[error("Link not found: {0}")]
    NotFound(String),

    /// Raised by repositories; the service wraps it into one of the above.
    #[error("{0}")]
    Backend(String),
}
