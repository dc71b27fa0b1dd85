//! Input filtering and the distinct-value gate.

/// Trims a raw input value. Returns `None` when nothing searchable remains.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Collapses repeated identical queries so the backend is not asked twice
/// in a row for the same thing.
#[derive(Debug, Default)]
pub struct QueryGate {
    last_dispatched: Option<String>,
}

impl QueryGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `query` differs from the last admitted value and
    /// records it as the new last value.
    pub fn admit(&mut self, query: &str) -> bool {
        if self.last_dispatched.as_deref() == Some(query) {
            return false;
        }
        self.last_dispatched = Some(query.to_string());
        true
    }

    /// Forgets the last admitted value. Called when the input is cleared so
    /// that retyping the previous query fetches again.
    pub fn reset(&mut self) {
        self.last_dispatched = None;
    }

    pub fn last_dispatched(&self) -> Option<&str> {
        self.last_dispatched.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   \t"), None);
        assert_eq!(normalize_query("  peth "), Some("peth"));
    }

    #[test]
    fn test_gate_rejects_repeats() {
        let mut gate = QueryGate::new();
        assert!(gate.admit("abc"));
        assert!(!gate.admit("abc"));
        assert!(gate.admit("abcd"));
        assert!(gate.admit("abc"));
        assert_eq!(gate.last_dispatched(), Some("abc"));
    }

    #[test]
    fn test_gate_reset_readmits() {
        let mut gate = QueryGate::new();
        assert!(gate.admit("guild"));
        gate.reset();
        assert_eq!(gate.last_dispatched(), None);
        assert!(gate.admit("guild"));
    }
}
