//! Leaderboard aggregation tests: weight accumulation, the descending-date
//! early exit, and watermark idempotency across repeated passes.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use paper_mentions::models::{MentionRecord, PaperIdentifiers, RawMention};
use paper_mentions::pipeline::aggregate;
use paper_mentions::store::{DocumentStore, MemoryStore};

fn doi(doi: &str) -> PaperIdentifiers {
    PaperIdentifiers { doi: Some(doi.to_string()), title: Some(doi.to_string()), ..Default::default() }
}

async fn seed_mention(store: &MemoryStore, mention_id: &str, paper: Uuid, date: DateTime<Utc>) {
    let raw = RawMention {
        id: mention_id.to_string(),
        conversation_id: mention_id.to_string(),
        created_at: date,
        ..Default::default()
    };
    let record = MentionRecord::from_raw(&raw, String::new(), Some(1), true, paper, Utc::now());
    store.insert_mention(record).await.unwrap();
}

#[tokio::test]
async fn test_weight_counts_qualifying_mentions_per_doi() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let paper_x = store.find_or_insert_paper(&doi("10.1/x")).await.unwrap();
    let paper_y = store.find_or_insert_paper(&doi("10.1/y")).await.unwrap();

    seed_mention(&store, "m1", paper_x.id, now - Duration::days(1)).await;
    seed_mention(&store, "m2", paper_x.id, now - Duration::days(2)).await;
    seed_mention(&store, "m3", paper_x.id, now - Duration::days(3)).await;
    seed_mention(&store, "m4", paper_y.id, now - Duration::days(4)).await;

    let summary = aggregate(&store, now).await.unwrap();
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.papers_created, 2);
    assert_eq!(summary.papers_bumped, 2);

    let top_x = store.find_top_paper_by_doi(Some("10.1/x")).await.unwrap().unwrap();
    assert_eq!(top_x.weight, 3);
    let top_y = store.find_top_paper_by_doi(Some("10.1/y")).await.unwrap().unwrap();
    assert_eq!(top_y.weight, 1);

    assert_eq!(store.top_mention_count().await, 4);
}

#[tokio::test]
async fn test_out_of_window_mention_halts_iteration() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let paper_x = store.find_or_insert_paper(&doi("10.1/x")).await.unwrap();
    let paper_old = store.find_or_insert_paper(&doi("10.1/old")).await.unwrap();

    seed_mention(&store, "recent", paper_x.id, now - Duration::days(1)).await;
    // Older than the ten-day window: iteration must stop here, so the old
    // paper never gets a top entry.
    seed_mention(&store, "stale", paper_old.id, now - Duration::days(11)).await;

    let summary = aggregate(&store, now).await.unwrap();
    assert_eq!(summary.processed, 1);

    assert!(store.find_top_paper_by_doi(Some("10.1/x")).await.unwrap().is_some());
    assert!(store.find_top_paper_by_doi(Some("10.1/old")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rerun_does_not_double_count() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let paper_x = store.find_or_insert_paper(&doi("10.1/x")).await.unwrap();
    seed_mention(&store, "m1", paper_x.id, now - Duration::days(1)).await;
    seed_mention(&store, "m2", paper_x.id, now - Duration::days(2)).await;

    let first = aggregate(&store, now).await.unwrap();
    assert_eq!(first.processed, 2);

    let second = aggregate(&store, now + Duration::hours(1)).await.unwrap();
    assert_eq!(second.processed, 0);

    let top = store.find_top_paper_by_doi(Some("10.1/x")).await.unwrap().unwrap();
    assert_eq!(top.weight, 2);
    assert_eq!(store.top_mention_count().await, 2);
}

#[tokio::test]
async fn test_new_mentions_after_watermark_are_picked_up() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let paper_x = store.find_or_insert_paper(&doi("10.1/x")).await.unwrap();
    seed_mention(&store, "m1", paper_x.id, now - Duration::days(2)).await;
    aggregate(&store, now).await.unwrap();

    // A newer mention arrives between passes.
    seed_mention(&store, "m2", paper_x.id, now - Duration::days(1)).await;
    let second = aggregate(&store, now + Duration::hours(1)).await.unwrap();
    assert_eq!(second.processed, 1);

    let top = store.find_top_paper_by_doi(Some("10.1/x")).await.unwrap().unwrap();
    assert_eq!(top.weight, 2);
}

#[tokio::test]
async fn test_papers_without_doi_share_one_top_entry() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let no_doi = PaperIdentifiers { title: Some("untracked preprint".to_string()), ..Default::default() };
    let paper = store.find_or_insert_paper(&no_doi).await.unwrap();
    seed_mention(&store, "m1", paper.id, now - Duration::days(1)).await;
    seed_mention(&store, "m2", paper.id, now - Duration::days(2)).await;

    aggregate(&store, now).await.unwrap();

    assert_eq!(store.top_paper_count().await, 1);
    let top = store.find_top_paper_by_doi(None).await.unwrap().unwrap();
    assert_eq!(top.weight, 2);
}

#[tokio::test]
async fn test_top_papers_ranked_by_weight() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let paper_x = store.find_or_insert_paper(&doi("10.1/x")).await.unwrap();
    let paper_y = store.find_or_insert_paper(&doi("10.1/y")).await.unwrap();
    seed_mention(&store, "m1", paper_x.id, now - Duration::days(1)).await;
    seed_mention(&store, "m2", paper_y.id, now - Duration::days(2)).await;
    seed_mention(&store, "m3", paper_y.id, now - Duration::days(3)).await;

    aggregate(&store, now).await.unwrap();

    let ranked = store.top_papers_by_weight().await.unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].doi.as_deref(), Some("10.1/y"));
    assert_eq!(ranked[0].weight, 2);
    assert_eq!(ranked[1].doi.as_deref(), Some("10.1/x"));
}
