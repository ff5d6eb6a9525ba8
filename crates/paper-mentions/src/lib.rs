//! paper-mentions
//!
//! Collects social-media mentions of scholarly papers, scores each mention
//! by an engagement/credibility heuristic, persists mention records
//! idempotently, and periodically aggregates the highest-scoring recent
//! mentions into a ranked "top papers" view.
//!
//! # Pipeline
//!
//! - **Normalizer**: free text to comparable token sets
//! - **Scorer**: engagement counters + textual-overlap heuristic -> votes
//! - **Thread unroller**: search-based reply-chain reconstruction
//! - **Ingestor**: per-paper querying, scoring, idempotent persistence
//! - **Aggregator**: rolling ten-day top papers / top mentions view
//!
//! # Example
//!
//! ```no_run
//! use paper_mentions::config::Config;
//! use paper_mentions::pipeline::Ingestor;
//! use paper_mentions::source::HttpMentionSource;
//! use paper_mentions::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let source = HttpMentionSource::new(&config)?;
//!     let store = MemoryStore::new();
//!     let _ingestor = Ingestor::new(&source, &store);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::{PipelineError, SourceError, StoreError};
pub use source::{HttpMentionSource, MentionSource};
pub use store::{DocumentStore, MemoryStore};
