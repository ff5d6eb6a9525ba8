//! Configuration for the mention pipeline.

use std::path::Path;
use std::time::Duration;

use crate::models::PaperIdentifiers;

/// Mention-source API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the mention source API.
    pub const BASE_URL: &str = "https://api.mentions.example";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Rate limit delay between requests without API key (200ms = 5 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(200);

    /// Rate limit delay between requests with API key (10ms = 100 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(10);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Search language restriction.
    pub const SEARCH_LANG: &str = "en";
}

/// Vote-score heuristic constants.
pub mod scoring {
    /// Bonus for substantive original commentary. Deliberately far larger
    /// than typical engagement counts so a substantive mention always
    /// outranks a shallow reshare regardless of follower count.
    pub const QUALIFYING_BONUS: i64 = 10_000;

    /// Bonus for an author bio matching a research keyword.
    pub const RESEARCH_BONUS: i64 = 500;

    /// Minimum body length (chars) for a mention to qualify.
    pub const MIN_BODY_CHARS: usize = 40;

    /// Minimum original-content tokens for a mention to qualify.
    pub const MIN_COMMENT_TOKENS: usize = 5;

    /// Bio keywords that grant the research bonus (case-insensitive
    /// substring match).
    pub const RESEARCH_KEYWORDS: &[&str] =
        &["researcher", "professor", "phd", "postdoc", "scientist"];
}

/// Time windows for thread reconstruction and aggregation.
pub mod windows {
    use chrono::Duration;

    /// Symmetric lookback/lookahead around a mid-thread reply.
    #[must_use]
    pub fn reply_window() -> Duration {
        Duration::hours(10)
    }

    /// Forward window from a thread's first mention. Threads unfold forward
    /// in time from their origin, hence the wider lookahead.
    #[must_use]
    pub fn thread_lookahead() -> Duration {
        Duration::hours(30)
    }

    /// Lookback window for the top-papers aggregation.
    #[must_use]
    pub fn top_lookback() -> Duration {
        Duration::days(10)
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mention source API key (optional).
    pub api_key: Option<String>,

    /// Base URL for the mention source API (for testing with mock servers).
    pub source_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Rate limit delay between requests.
    pub rate_limit_delay: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Whether ingestion unrolls reply threads.
    pub fetch_threads: bool,
}

impl Config {
    /// Create a new configuration with optional API key.
    ///
    /// The rate limit delay is adjusted based on API key presence:
    /// 5 req/s without a key, 100 req/s with one.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            source_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            fetch_threads: false,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            source_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            cache_ttl: Duration::from_secs(0),          // No caching in tests
            cache_max_size: 0,
            fetch_threads: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("MENTION_SOURCE_API_KEY").ok();
        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("MENTION_SOURCE_URL") {
            config.source_url = url;
        }
        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Load the input paper list from a JSON file: an array of
/// `{title, doi, pubmed_id, pmcid}` descriptors, each field nullable.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid JSON.
pub fn load_paper_list(path: &Path) -> anyhow::Result<Vec<PaperIdentifiers>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read paper list {}: {e}", path.display()))?;
    let papers: Vec<PaperIdentifiers> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse paper list {}: {e}", path.display()))?;
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY);
    }

    #[test]
    fn test_config_with_api_key() {
        let config = Config::new(Some("test-key".to_string()));
        assert!(config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY_WITH_KEY);
    }

    #[test]
    fn test_windows() {
        assert_eq!(windows::reply_window().num_hours(), 10);
        assert_eq!(windows::thread_lookahead().num_hours(), 30);
        assert_eq!(windows::top_lookback().num_days(), 10);
    }

    #[test]
    fn test_load_paper_list() {
        let dir = std::env::temp_dir();
        let path = dir.join("paper_list_test.json");
        std::fs::write(
            &path,
            r#"[{"title": "A Study", "doi": "10.1/x", "pubmed_id": null, "pmcid": null}]"#,
        )
        .unwrap();

        let papers = load_paper_list(&path).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].doi.as_deref(), Some("10.1/x"));

        std::fs::remove_file(&path).ok();
    }
}
