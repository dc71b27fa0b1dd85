use std::time::Duration;

/// Maximum number of results shown per category in the search modal
pub const SEARCH_RESULT_LIMIT: usize = 3;

/// Quiet period after the last keystroke before lookups are dispatched
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on a single category lookup
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Fallback label when a player has neither a username nor a name
pub const UNKNOWN_PLAYER_LABEL: &str = "Unknown";

/// Message shown next to a required form field left blank
pub const REQUIRED_FIELD_MESSAGE: &str = "This is a required field.";
