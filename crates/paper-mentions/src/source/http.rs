//! HTTP client for the mention source API.
//!
//! Provides an async client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff for transient failures
//! - Rate limiting between requests
//! - Response caching with a short TTL

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{SourceError, SourceResult};
use crate::models::{MentionSearchResult, RawMention, RawProfile};
use crate::source::MentionSource;

/// HTTP implementation of [`MentionSource`].
#[derive(Clone)]
pub struct HttpMentionSource {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// API key (optional).
    api_key: Option<String>,

    /// Base URL.
    base_url: String,

    /// Rate limit delay.
    rate_limit_delay: Duration,
}

impl HttpMentionSource {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            api_key: config.api_key.clone(),
            base_url: config.source_url.clone(),
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> SourceResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Check cache
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return serde_json::from_value(cached).map_err(SourceError::from);
        }

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self.client.get(url).query(params).send().await?;

        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        // Cache response
        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(SourceError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> SourceResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(SourceError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(SourceError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

#[async_trait::async_trait]
impl MentionSource for HttpMentionSource {
    async fn search(&self, query: &str) -> SourceResult<Vec<RawMention>> {
        let url = format!("{}/mentions/search", self.base_url);

        let params = vec![
            ("query".to_string(), query.to_string()),
            ("lang".to_string(), api::SEARCH_LANG.to_string()),
        ];

        let result: MentionSearchResult = self.get(&url, &params).await?;
        Ok(result.data)
    }

    async fn search_window(
        &self,
        query: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SourceResult<Vec<RawMention>> {
        let url = format!("{}/mentions/search", self.base_url);

        let params = vec![
            ("query".to_string(), query.to_string()),
            ("lang".to_string(), api::SEARCH_LANG.to_string()),
            ("since".to_string(), since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("until".to_string(), until.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];

        let result: MentionSearchResult = self.get(&url, &params).await?;
        Ok(result.data)
    }

    async fn lookup_profile(&self, username: &str) -> SourceResult<RawProfile> {
        let url = format!("{}/profiles/{}", self.base_url, username);
        let params: Vec<(String, String)> = vec![];

        self.get(&url, &params).await
    }
}

impl std::fmt::Debug for HttpMentionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMentionSource")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
