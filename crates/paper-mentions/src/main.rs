//! paper-mentions batch entry point.
//!
//! Loads the paper list, ingests mentions for each paper in sequence, and
//! optionally runs an aggregation pass and prints the top-papers view.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_mentions::config::{Config, load_paper_list};
use paper_mentions::error::PipelineError;
use paper_mentions::formatters::format_top_papers_markdown;
use paper_mentions::pipeline::{Ingestor, aggregate};
use paper_mentions::source::HttpMentionSource;
use paper_mentions::store::{DocumentStore, MemoryStore};

#[derive(Parser, Debug)]
#[command(name = "paper-mentions")]
#[command(about = "Collect, score, and rank social-media mentions of scholarly papers")]
#[command(version)]
struct Cli {
    /// JSON file with paper descriptors: [{title, doi, pubmed_id, pmcid}]
    #[arg(long)]
    papers: PathBuf,

    /// Mention source API key (optional, enables higher rate limits)
    #[arg(long, env = "MENTION_SOURCE_API_KEY")]
    api_key: Option<String>,

    /// Base URL of the mention source API
    #[arg(long, env = "MENTION_SOURCE_URL")]
    source_url: Option<String>,

    /// Unroll reply threads for every queried mention
    #[arg(long)]
    fetch_threads: bool,

    /// Run an aggregation pass after ingestion and print the top view
    #[arg(long)]
    aggregate: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        fetch_threads = cli.fetch_threads,
        "Starting paper-mentions batch"
    );

    let mut config = Config::new(cli.api_key);
    if let Some(url) = cli.source_url {
        config.source_url = url;
    }
    config.fetch_threads = cli.fetch_threads;

    let papers = load_paper_list(&cli.papers)?;
    tracing::info!(count = papers.len(), "loaded paper list");

    let source = HttpMentionSource::new(&config)?;
    let store = MemoryStore::new();
    let ingestor = Ingestor::new(&source, &store);

    for paper in &papers {
        match ingestor.ingest_paper(paper, config.fetch_threads).await {
            Ok(summary) => {
                tracing::debug!(paper = paper.label(), ?summary, "paper done");
            }
            Err(PipelineError::MalformedIdentifier) => {
                tracing::warn!("paper with no identifiers, skipping");
            }
            Err(e) => {
                tracing::warn!(paper = paper.label(), error = %e, "paper ingestion failed");
            }
        }
    }

    if cli.aggregate {
        let summary = aggregate(&store, chrono::Utc::now()).await?;
        tracing::info!(?summary, "aggregation done");

        let top = store.top_papers_by_weight().await?;
        println!("{}", format_top_papers_markdown(&top));
    }

    Ok(())
}
