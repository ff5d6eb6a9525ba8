//! Ingestion pipeline tests: idempotent persistence, error scoping, and the
//! cross-identifier duplicate case, against a mocked mention source.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_mentions::config::Config;
use paper_mentions::error::PipelineError;
use paper_mentions::models::PaperIdentifiers;
use paper_mentions::pipeline::Ingestor;
use paper_mentions::source::HttpMentionSource;
use paper_mentions::store::{DocumentStore, MemoryStore};

fn setup_source(mock_server: &MockServer) -> HttpMentionSource {
    let config = Config::for_testing(&mock_server.uri());
    HttpMentionSource::new(&config).unwrap()
}

fn sample_mention_json(id: &str, username: &str, text: &str, likes: i64) -> serde_json::Value {
    json!({
        "id": id,
        "conversation_id": id,
        "username": username,
        "user_id": format!("u-{}", username),
        "text": text,
        "urls": [],
        "link": format!("https://social.example/{}/{}", username, id),
        "is_reshare": false,
        "like_count": likes,
        "reshare_count": 0,
        "created_at": "2024-05-01T12:00:00Z"
    })
}

fn sample_profile_json(username: &str, followers: i64) -> serde_json::Value {
    json!({
        "username": username,
        "followers": followers,
        "avatar_url": format!("https://img.example/{}", username),
        "bio": "assorted opinions"
    })
}

async fn mock_search(mock_server: &MockServer, query: &str, mentions: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/mentions/search"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": mentions })))
        .mount(mock_server)
        .await;
}

async fn mock_profile(mock_server: &MockServer, username: &str, followers: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/profiles/{username}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_profile_json(username, followers)),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_ingest_persists_and_scores_queried_mentions() {
    let mock_server = MockServer::start().await;

    mock_search(
        &mock_server,
        "\"10.1/x\"",
        vec![sample_mention_json(
            "m1",
            "alice",
            "we reran the analysis and the effect survives every correction we threw at it",
            10,
        )],
    )
    .await;
    mock_profile(&mock_server, "alice", 200).await;

    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);
    let paper = PaperIdentifiers { doi: Some("10.1/x".to_string()), ..Default::default() };

    let summary = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(summary.queried, 1);
    assert_eq!(summary.inserted, 1);

    let record = store.find_mention("m1").await.unwrap().unwrap();
    assert!(record.is_queried_mention);
    assert_eq!(record.profile_image_url, "https://img.example/alice");
    // likes + reshares + qualifying bonus + followers
    assert_eq!(record.votes, Some(10 + 0 + 10_000 + 200));
}

#[tokio::test]
async fn test_reingestion_is_idempotent() {
    let mock_server = MockServer::start().await;

    mock_search(
        &mock_server,
        "\"10.1/x\"",
        vec![sample_mention_json("m1", "alice", "short note", 10)],
    )
    .await;
    mock_profile(&mock_server, "alice", 200).await;

    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);
    let paper = PaperIdentifiers { doi: Some("10.1/x".to_string()), ..Default::default() };

    let first = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(first.inserted, 1);
    let original = store.find_mention("m1").await.unwrap().unwrap();

    let second = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped_existing, 1);
    assert_eq!(store.mention_count().await, 1);

    // The existing record was not touched.
    let unchanged = store.find_mention("m1").await.unwrap().unwrap();
    assert_eq!(unchanged.id, original.id);
    assert_eq!(unchanged.date_updated, original.date_updated);
}

#[tokio::test]
async fn test_duplicate_across_identifier_queries_persists_once() {
    let mock_server = MockServer::start().await;

    // The same mention contains both the title and the doi, so both
    // identifier queries return it.
    let shared = sample_mention_json("m1", "alice", "covers title and doi", 1);
    mock_search(&mock_server, "\"Alpha Beta\"", vec![shared.clone()]).await;
    mock_search(&mock_server, "\"10.1/x\"", vec![shared]).await;
    mock_profile(&mock_server, "alice", 50).await;

    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);
    let paper = PaperIdentifiers {
        title: Some("Alpha Beta".to_string()),
        doi: Some("10.1/x".to_string()),
        ..Default::default()
    };

    let summary = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(summary.queried, 2);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped_existing, 1);
    assert_eq!(store.mention_count().await, 1);
}

#[tokio::test]
async fn test_paper_without_identifiers_is_rejected() {
    let mock_server = MockServer::start().await;
    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);

    let err = ingestor.ingest_paper(&PaperIdentifiers::default(), false).await.unwrap_err();
    assert!(matches!(err, PipelineError::MalformedIdentifier));
    assert_eq!(store.mention_count().await, 0);
}

#[tokio::test]
async fn test_profile_failure_skips_only_that_mention() {
    let mock_server = MockServer::start().await;

    mock_search(
        &mock_server,
        "\"10.1/x\"",
        vec![
            sample_mention_json("m1", "ghost", "from an account with no profile", 5),
            sample_mention_json("m2", "alice", "from a resolvable account", 7),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/profiles/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such profile"))
        .mount(&mock_server)
        .await;
    mock_profile(&mock_server, "alice", 10).await;

    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);
    let paper = PaperIdentifiers { doi: Some("10.1/x".to_string()), ..Default::default() };

    let summary = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped_errors, 1);
    assert!(store.find_mention("m1").await.unwrap().is_none());
    assert!(store.find_mention("m2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_identifier_query_does_not_abort_others() {
    let mock_server = MockServer::start().await;

    // The title query has no mock, so it 404s; the doi query succeeds.
    Mock::given(method("GET"))
        .and(path("/mentions/search"))
        .and(query_param("query", "\"Alpha Beta\""))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&mock_server)
        .await;
    mock_search(
        &mock_server,
        "\"10.1/x\"",
        vec![sample_mention_json("m1", "alice", "only found via doi", 2)],
    )
    .await;
    mock_profile(&mock_server, "alice", 10).await;

    let source = setup_source(&mock_server);
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);
    let paper = PaperIdentifiers {
        title: Some("Alpha Beta".to_string()),
        doi: Some("10.1/x".to_string()),
        ..Default::default()
    };

    let summary = ingestor.ingest_paper(&paper, false).await.unwrap();
    assert_eq!(summary.skipped_errors, 1);
    assert_eq!(summary.inserted, 1);
}
