//! In-memory document store.
//!
//! Backs the batch binary and the test suites. Collections live behind one
//! async mutex; the pipeline is sequential so contention is not a concern.

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    MentionRecord, PaperIdentifiers, PaperRecord, TopMentionRecord, TopPaperRecord,
};
use crate::store::DocumentStore;

#[derive(Default)]
struct Collections {
    papers: Vec<PaperRecord>,
    mentions: Vec<MentionRecord>,
    top_papers: Vec<TopPaperRecord>,
    top_mentions: Vec<TopMentionRecord>,
    watermark: Option<DateTime<Utc>>,
}

/// In-memory [`DocumentStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted mention records.
    pub async fn mention_count(&self) -> usize {
        self.inner.lock().await.mentions.len()
    }

    /// Number of top-paper records.
    pub async fn top_paper_count(&self) -> usize {
        self.inner.lock().await.top_papers.len()
    }

    /// Number of top-mention records.
    pub async fn top_mention_count(&self) -> usize {
        self.inner.lock().await.top_mentions.len()
    }

    /// Snapshot of all top-mention records.
    pub async fn top_mentions(&self) -> Vec<TopMentionRecord> {
        self.inner.lock().await.top_mentions.clone()
    }
}

fn same_identifiers(paper: &PaperRecord, ids: &PaperIdentifiers) -> bool {
    paper.title == ids.title
        && paper.doi == ids.doi
        && paper.pubmed_id == ids.pubmed_id
        && paper.pmcid == ids.pmcid
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find_paper(&self, id: Uuid) -> StoreResult<Option<PaperRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.papers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_or_insert_paper(&self, ids: &PaperIdentifiers) -> StoreResult<PaperRecord> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner.papers.iter().find(|p| same_identifiers(p, ids)) {
            return Ok(existing.clone());
        }
        let record = PaperRecord::new(ids);
        inner.papers.push(record.clone());
        Ok(record)
    }

    async fn find_mention(&self, mention_id: &str) -> StoreResult<Option<MentionRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.mentions.iter().find(|m| m.mention_id == mention_id).cloned())
    }

    async fn insert_mention(&self, record: MentionRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.mentions.iter().any(|m| m.mention_id == record.mention_id) {
            return Err(StoreError::DuplicateKey {
                collection: "mentions",
                key: record.mention_id,
            });
        }
        inner.mentions.push(record);
        Ok(())
    }

    async fn mentions_by_date_desc(
        &self,
    ) -> StoreResult<BoxStream<'static, StoreResult<MentionRecord>>> {
        let inner = self.inner.lock().await;
        let mut snapshot = inner.mentions.clone();
        snapshot.sort_by(|a, b| b.mention_date.cmp(&a.mention_date));
        Ok(futures::stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }

    async fn find_top_paper_by_doi(
        &self,
        doi: Option<&str>,
    ) -> StoreResult<Option<TopPaperRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.top_papers.iter().find(|p| p.doi.as_deref() == doi).cloned())
    }

    async fn insert_top_paper(&self, record: TopPaperRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.top_papers.iter().any(|p| p.id == record.id) {
            return Err(StoreError::DuplicateKey {
                collection: "top_papers",
                key: record.id.to_string(),
            });
        }
        inner.top_papers.push(record);
        Ok(())
    }

    async fn update_top_paper(&self, record: TopPaperRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        match inner.top_papers.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::MissingRecord {
                collection: "top_papers",
                key: record.id.to_string(),
            }),
        }
    }

    async fn top_papers_by_weight(&self) -> StoreResult<Vec<TopPaperRecord>> {
        let inner = self.inner.lock().await;
        let mut papers = inner.top_papers.clone();
        papers.sort_by(|a, b| b.weight.cmp(&a.weight));
        Ok(papers)
    }

    async fn insert_top_mention(&self, record: TopMentionRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.top_mentions.push(record);
        Ok(())
    }

    async fn aggregation_watermark(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let inner = self.inner.lock().await;
        Ok(inner.watermark)
    }

    async fn set_aggregation_watermark(&self, at: DateTime<Utc>) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.watermark = Some(at);
        Ok(())
    }
}
