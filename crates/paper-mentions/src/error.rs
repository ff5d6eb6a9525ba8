//! Error types for the mention pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations. Two layers: `SourceError` from the HTTP client against
//! the mention source, and `PipelineError` scoping failures to one mention
//! or one paper so sibling work is never aborted.

use std::time::Duration;

/// Errors from the mention-source HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the mention source (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the source
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl SourceError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }
}

/// Errors from the document store layer.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Insert hit an existing unique key despite the idempotency check.
    #[error("Duplicate key in {collection}: {key}")]
    DuplicateKey {
        /// Collection the insert targeted
        collection: &'static str,
        /// The conflicting key
        key: String,
    },

    /// Update targeted a record that does not exist.
    #[error("Missing record in {collection}: {key}")]
    MissingRecord {
        /// Collection the update targeted
        collection: &'static str,
        /// The missing key
        key: String,
    },
}

/// Errors from pipeline execution, scoped to one mention or one paper.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The author profile could not be resolved. Fatal to scoring that one
    /// mention; no default score is fabricated.
    #[error("Profile lookup failed for @{username}: {source}")]
    ProfileLookup {
        /// Username the lookup was attempted for
        username: String,
        /// Underlying client error
        source: SourceError,
    },

    /// A search or lookup against the mention source failed.
    #[error("Source query failed: {0}")]
    SourceQuery(#[from] SourceError),

    /// All four paper identifiers were null.
    #[error("Paper has no identifiers (title, doi, pubmed_id, pmcid all null)")]
    MalformedIdentifier,

    /// Unexpected duplicate-key violation or other store failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl PipelineError {
    /// Create a profile lookup error.
    #[must_use]
    pub fn profile_lookup(username: impl Into<String>, source: SourceError) -> Self {
        Self::ProfileLookup { username: username.into(), source }
    }

    /// Returns true if retrying the same operation could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::SourceQuery(e) | Self::ProfileLookup { source: e, .. } => e.is_retryable(),
            Self::MalformedIdentifier | Self::Persistence(_) => false,
        }
    }
}

/// Result type alias for source-client operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
