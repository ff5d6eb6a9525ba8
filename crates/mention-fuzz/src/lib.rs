//! Fuzzing library for paper-mentions.
//!
//! This crate provides fuzzing targets for the mention-source JSON models
//! and the text normalizer.
//!
//! # Usage
//!
//! ```bash
//! cd crates/mention-fuzz
//! cargo +nightly fuzz run fuzz_mention_parse -- -max_total_time=60
//! ```

pub use paper_mentions::models;
pub use paper_mentions::pipeline::normalize;
