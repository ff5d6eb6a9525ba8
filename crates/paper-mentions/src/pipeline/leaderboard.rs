//! Leaderboard aggregation.
//!
//! A periodic batch pass over persisted mentions, newest first, that
//! materializes the "top papers" / "top mentions" view for the last ten
//! days. The descending `mention_date` order is a hard precondition: the
//! first out-of-window mention ends the pass, it is not filtered past.

use chrono::{DateTime, Utc};
use futures::StreamExt;
use tracing::{info, warn};

use crate::config::windows;
use crate::error::PipelineResult;
use crate::models::{TopMentionRecord, TopPaperRecord};
use crate::store::DocumentStore;

/// Counters for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Qualifying mentions processed.
    pub processed: usize,

    /// Top-paper entries created.
    pub papers_created: usize,

    /// Existing top-paper entries whose weight was bumped.
    pub papers_bumped: usize,
}

/// Run one aggregation pass at time `now`.
///
/// Processes every mention newer than both the ten-day cutoff and the
/// store's aggregation watermark, then advances the watermark to the newest
/// `mention_date` processed. The watermark makes repeated passes over an
/// unchanged store no-ops: weights are never double-incremented and no
/// duplicate top-mention entries appear.
pub async fn aggregate<D: DocumentStore>(
    store: &D,
    now: DateTime<Utc>,
) -> PipelineResult<AggregateSummary> {
    let cutoff = now - windows::top_lookback();
    let watermark = store.aggregation_watermark().await?;

    let mut summary = AggregateSummary::default();
    let mut newest_processed: Option<DateTime<Utc>> = None;

    let mut mentions = store.mentions_by_date_desc().await?;
    while let Some(mention) = mentions.next().await {
        let mention = mention?;

        // Early exit, not a filter: order is descending by date.
        if mention.mention_date < cutoff {
            break;
        }
        // Already aggregated by a prior pass.
        if let Some(w) = watermark {
            if mention.mention_date <= w {
                break;
            }
        }

        let Some(paper) = store.find_paper(mention.paper).await? else {
            warn!(mention_id = %mention.mention_id, "mention references missing paper, skipping");
            continue;
        };

        let top_paper = match store.find_top_paper_by_doi(paper.doi.as_deref()).await? {
            Some(mut existing) => {
                existing.weight += 1;
                store.update_top_paper(existing.clone()).await?;
                summary.papers_bumped += 1;
                existing
            }
            None => {
                let created = TopPaperRecord::from_paper(&paper);
                store.insert_top_paper(created.clone()).await?;
                summary.papers_created += 1;
                created
            }
        };

        store.insert_top_mention(TopMentionRecord::new(mention.id, top_paper.id, now)).await?;

        newest_processed = Some(match newest_processed {
            Some(seen) => seen.max(mention.mention_date),
            None => mention.mention_date,
        });
        summary.processed += 1;
    }

    if let Some(at) = newest_processed {
        store.set_aggregation_watermark(at).await?;
    }

    info!(
        processed = summary.processed,
        papers_created = summary.papers_created,
        papers_bumped = summary.papers_bumped,
        "aggregation pass finished"
    );
    Ok(summary)
}
