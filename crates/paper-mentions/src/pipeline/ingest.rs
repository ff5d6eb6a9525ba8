//! Per-paper mention ingestion.
//!
//! Orchestrates identifier-based querying, optional thread unrolling,
//! scoring, and idempotent persistence. Failures scoped to one query or one
//! mention are logged and skipped; they never abort sibling work.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, PipelineResult, StoreError};
use crate::models::{MentionRecord, PaperIdentifiers, PaperRecord, RawMention};
use crate::pipeline::scoring::{ScoredMention, Scorer};
use crate::pipeline::thread;
use crate::source::MentionSource;
use crate::store::DocumentStore;

/// Counters for one per-paper ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Raw mentions returned across all identifier queries.
    pub queried: usize,

    /// New mention records written.
    pub inserted: usize,

    /// Mentions skipped because their id was already persisted.
    pub skipped_existing: usize,

    /// Mentions or queries skipped due to scoped failures.
    pub skipped_errors: usize,
}

/// Ingests mentions for one paper at a time.
pub struct Ingestor<'a, S, D> {
    source: &'a S,
    store: &'a D,
}

impl<'a, S: MentionSource, D: DocumentStore> Ingestor<'a, S, D> {
    /// Create an ingestor over the given source and store.
    pub fn new(source: &'a S, store: &'a D) -> Self {
        Self { source, store }
    }

    /// Collect and persist mentions for one paper.
    ///
    /// Queries the source once per non-null identifier (exact-phrase), then
    /// scores and persists each resulting mention. With `fetch_threads` the
    /// full reply chain is persisted; only the queried mention gets votes.
    ///
    /// # Errors
    ///
    /// `MalformedIdentifier` when all four identifiers are null. Store
    /// failures other than duplicate keys propagate.
    pub async fn ingest_paper(
        &self,
        paper: &PaperIdentifiers,
        fetch_threads: bool,
    ) -> PipelineResult<IngestSummary> {
        if paper.is_empty() {
            return Err(PipelineError::MalformedIdentifier);
        }

        let paper_record = self.store.find_or_insert_paper(paper).await?;
        let mut summary = IngestSummary::default();

        // One query per identifier; duplicates across identifiers are fine,
        // persistence idempotency absorbs them.
        let mut mentions: Vec<RawMention> = Vec::new();
        for identifier in paper.present() {
            let query = format!("\"{identifier}\"");
            match self.source.search(&query).await {
                Ok(batch) => {
                    debug!(identifier, count = batch.len(), "identifier query returned");
                    mentions.extend(batch);
                }
                Err(e) => {
                    warn!(identifier, error = %e, "identifier query failed, skipping");
                    summary.skipped_errors += 1;
                }
            }
        }
        summary.queried = mentions.len();

        let scorer = Scorer::new(self.source);
        for mention in &mentions {
            if fetch_threads {
                self.ingest_thread(&scorer, mention, paper, &paper_record, &mut summary).await?;
            } else {
                self.ingest_single(&scorer, mention, paper, &paper_record, &mut summary).await?;
            }
        }

        info!(
            paper = paper.label(),
            queried = summary.queried,
            inserted = summary.inserted,
            "paper ingestion finished"
        );
        Ok(summary)
    }

    /// Score a mention against its own text only and persist it.
    async fn ingest_single(
        &self,
        scorer: &Scorer<'a, S>,
        mention: &RawMention,
        paper: &PaperIdentifiers,
        paper_record: &PaperRecord,
        summary: &mut IngestSummary,
    ) -> PipelineResult<()> {
        let scored = match scorer.score(mention, &[mention.text.clone()], paper).await {
            Ok(scored) => scored,
            Err(e) => {
                warn!(mention_id = %mention.id, error = %e, "scoring failed, skipping mention");
                summary.skipped_errors += 1;
                return Ok(());
            }
        };

        self.persist(mention, scored, true, paper_record, summary).await
    }

    /// Unroll the mention's thread and persist every mention in it.
    ///
    /// Full votes are computed only for the mention that matched the
    /// original query; thread-context mentions get a null score.
    async fn ingest_thread(
        &self,
        scorer: &Scorer<'a, S>,
        queried: &RawMention,
        paper: &PaperIdentifiers,
        paper_record: &PaperRecord,
        summary: &mut IngestSummary,
    ) -> PipelineResult<()> {
        let unrolled = match thread::unroll(self.source, queried).await {
            Ok(unrolled) => unrolled,
            Err(e) => {
                warn!(mention_id = %queried.id, error = %e, "thread unroll failed, skipping");
                summary.skipped_errors += 1;
                return Ok(());
            }
        };

        for member in &unrolled.mentions {
            let is_queried_mention = member.id == queried.id;
            let scored = if is_queried_mention {
                scorer.score(member, &unrolled.texts, paper).await
            } else {
                scorer.profile_image_only(member).await
            };

            match scored {
                Ok(scored) => {
                    self.persist(member, scored, is_queried_mention, paper_record, summary)
                        .await?;
                }
                Err(e) => {
                    warn!(mention_id = %member.id, error = %e, "scoring failed, skipping mention");
                    summary.skipped_errors += 1;
                }
            }
        }
        Ok(())
    }

    /// Idempotent upsert-by-absence keyed on `mention_id`.
    ///
    /// Existing records are never overwritten; an unexpected duplicate-key
    /// violation is logged and skipped, never fatal to the batch.
    async fn persist(
        &self,
        mention: &RawMention,
        scored: ScoredMention,
        is_queried_mention: bool,
        paper_record: &PaperRecord,
        summary: &mut IngestSummary,
    ) -> PipelineResult<()> {
        if self.store.find_mention(&mention.id).await?.is_some() {
            debug!(mention_id = %mention.id, "already persisted, skipping");
            summary.skipped_existing += 1;
            return Ok(());
        }

        let record = MentionRecord::from_raw(
            mention,
            scored.profile_image_url,
            scored.votes,
            is_queried_mention,
            paper_record.id,
            Utc::now(),
        );

        match self.store.insert_mention(record).await {
            Ok(()) => summary.inserted += 1,
            Err(StoreError::DuplicateKey { key, .. }) => {
                warn!(mention_id = %key, "duplicate key despite idempotency check, skipping");
                summary.skipped_existing += 1;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
