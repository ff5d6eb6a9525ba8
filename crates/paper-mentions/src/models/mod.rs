//! Data models for the mention pipeline.
//!
//! Raw source payloads use `#[serde(default)]` for optional fields so a
//! sparse mention-source response still deserializes. Persisted records
//! carry store-assigned `Uuid` ids and reference each other by id.

mod mention;
mod paper;

pub use mention::{MentionRecord, MentionSearchResult, RawMention, RawProfile, TopMentionRecord};
pub use paper::{PaperIdentifiers, PaperRecord, TopPaperRecord};
