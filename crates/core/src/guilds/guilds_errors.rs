use thiserror::Error;

/// Errors raised while submitting a guild.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuildError {
    #[error("Unable to submit guild. Error: {0}")]
    SubmitFailed(String),

    /// Raised by repositories; the service wraps it into `SubmitFailed`.
    #[error("{0}")]
    Backend(String),
}
