//! Document store: explicit repository operations per entity type.
//!
//! The pipeline never talks to a database driver directly; it receives a
//! `DocumentStore` reference constructed once at batch start. The store owns
//! all records; the pipeline only creates and mutates, never deletes.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{
    MentionRecord, PaperIdentifiers, PaperRecord, TopMentionRecord, TopPaperRecord,
};

/// Repository operations over the four record collections.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a paper record by id.
    async fn find_paper(&self, id: Uuid) -> StoreResult<Option<PaperRecord>>;

    /// Find the paper matching these identifiers, inserting a fresh
    /// zero-weight record when absent.
    async fn find_or_insert_paper(&self, ids: &PaperIdentifiers) -> StoreResult<PaperRecord>;

    /// Fetch a mention record by the source's mention id.
    async fn find_mention(&self, mention_id: &str) -> StoreResult<Option<MentionRecord>>;

    /// Insert a mention record. Fails with `StoreError::DuplicateKey` when a
    /// record with the same `mention_id` already exists.
    async fn insert_mention(&self, record: MentionRecord) -> StoreResult<()>;

    /// Stream all mention records ordered by `mention_date` descending.
    ///
    /// The descending order is a hard precondition of the aggregator's
    /// early exit.
    async fn mentions_by_date_desc(
        &self,
    ) -> StoreResult<BoxStream<'static, StoreResult<MentionRecord>>>;

    /// Fetch a top-paper record by doi (null dois match null).
    async fn find_top_paper_by_doi(&self, doi: Option<&str>)
    -> StoreResult<Option<TopPaperRecord>>;

    /// Insert a top-paper record.
    async fn insert_top_paper(&self, record: TopPaperRecord) -> StoreResult<()>;

    /// Update an existing top-paper record.
    async fn update_top_paper(&self, record: TopPaperRecord) -> StoreResult<()>;

    /// Fetch all top-paper records ordered by weight descending.
    async fn top_papers_by_weight(&self) -> StoreResult<Vec<TopPaperRecord>>;

    /// Insert a top-mention record.
    async fn insert_top_mention(&self, record: TopMentionRecord) -> StoreResult<()>;

    /// Newest `mention_date` processed by a completed aggregation pass.
    async fn aggregation_watermark(&self) -> StoreResult<Option<DateTime<Utc>>>;

    /// Advance the aggregation watermark.
    async fn set_aggregation_watermark(&self, at: DateTime<Utc>) -> StoreResult<()>;
}
