//! Mention source: the black-box search/profile backend.
//!
//! `MentionSource` is the seam the pipeline depends on; `HttpMentionSource`
//! is the production implementation. Tests either mock the HTTP API with
//! wiremock or implement the trait directly.

mod http;

pub use http::HttpMentionSource;

use chrono::{DateTime, Utc};

use crate::error::SourceResult;
use crate::models::{RawMention, RawProfile};

/// Capabilities required of the mention source.
///
/// Search must honor exact-phrase semantics for double-quoted queries; that
/// is what makes identifier queries (DOIs, titles) precise.
#[async_trait::async_trait]
pub trait MentionSource: Send + Sync {
    /// Search for mentions containing `query`, newest first.
    async fn search(&self, query: &str) -> SourceResult<Vec<RawMention>>;

    /// Search restricted to a publication-time window, newest first.
    async fn search_window(
        &self,
        query: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SourceResult<Vec<RawMention>>;

    /// Resolve an author profile by username.
    ///
    /// Returns `SourceError::NotFound` when no profile matches.
    async fn lookup_profile(&self, username: &str) -> SourceResult<RawProfile>;
}
