use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation API, including the `/api` prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quiet period before a typed query is committed to a suggestion fetch
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Queries shorter than this never produce suggestions
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Per-request timeout for API calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Tunables consumed by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(default_search_debounce_ms()),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn settings(&self) -> Settings {
        Settings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_query_len: self.min_query_len,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let vars: Vec<(String, String)> = Vec::new();
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.settings(), Settings::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("API_BASE_URL".to_string(), "http://movies.local/api".to_string()),
            ("SEARCH_DEBOUNCE_MS".to_string(), "150".to_string()),
            ("MIN_QUERY_LEN".to_string(), "3".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.api_base_url, "http://movies.local/api");
        assert_eq!(config.settings().debounce, Duration::from_millis(150));
        assert_eq!(config.settings().min_query_len, 3);
    }
}
