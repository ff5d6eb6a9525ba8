//! The mention scoring and ranking pipeline.
//!
//! Leaf to root: text normalization, vote scoring, thread unrolling,
//! per-paper ingestion, and the periodic leaderboard aggregation.

pub mod ingest;
pub mod leaderboard;
pub mod normalize;
pub mod scoring;
pub mod thread;

pub use ingest::{IngestSummary, Ingestor};
pub use leaderboard::{AggregateSummary, aggregate};
pub use normalize::normalize;
pub use scoring::{ScoredMention, Scorer, compute_votes};
pub use thread::{UnrolledThread, unroll};
