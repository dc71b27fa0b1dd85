use std::time::Duration;

use metafam_core::constants::{LOOKUP_TIMEOUT, SEARCH_DEBOUNCE, SEARCH_RESULT_LIMIT};
use metafam_core::SearchConfig;

const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8080/v1/graphql";

pub struct Config {
    pub graphql_url: String,
    pub graphql_token: Option<String>,
    pub request_timeout: Duration,
    pub search: SearchConfig,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str, default: Duration| {
            var(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let graphql_url = var("MF_GRAPHQL_URL").unwrap_or_else(|| DEFAULT_GRAPHQL_URL.into());
        let graphql_token = var("MF_GRAPHQL_TOKEN").filter(|t| !t.trim().is_empty());
        let result_limit = var("MF_SEARCH_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(SEARCH_RESULT_LIMIT);
        let search = SearchConfig::default()
            .with_debounce(millis("MF_SEARCH_DEBOUNCE_MS", SEARCH_DEBOUNCE))
            .with_result_limit(result_limit)
            .with_lookup_timeout(millis("MF_LOOKUP_TIMEOUT_MS", LOOKUP_TIMEOUT));

        Self {
            graphql_url,
            graphql_token,
            request_timeout: millis("MF_REQUEST_TIMEOUT_MS", Duration::from_secs(10)),
            search,
            log_format: var("MF_LOG_FORMAT").unwrap_or_else(|| "text".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.graphql_token, None);
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = config_from(&[
            ("MF_GRAPHQL_URL", "https://api.metagame.wtf/v1/graphql"),
            ("MF_GRAPHQL_TOKEN", "  "),
            ("MF_SEARCH_DEBOUNCE_MS", "150"),
            ("MF_SEARCH_LIMIT", "five"),
            ("MF_LOOKUP_TIMEOUT_MS", "2000"),
            ("MF_LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.graphql_url, "https://api.metagame.wtf/v1/graphql");
        assert_eq!(config.graphql_token, None);
        assert_eq!(config.search.debounce, Duration::from_millis(150));
        assert_eq!(config.search.result_limit, SEARCH_RESULT_LIMIT);
        assert_eq!(config.search.lookup_timeout, Duration::from_secs(2));
        assert_eq!(config.log_format, "json");
    }
}
