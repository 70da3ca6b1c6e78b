//! Offline inspection tool for tweet archives.
//!
//! Reads an export archive through the same services the server uses,
//! without speaking any protocol.
//!
//! # Usage
//!
//! ```bash
//! # Most recent tweets
//! cargo run --bin inspect -- --archive twitter.zip list --limit 10
//!
//! # One tweet, canonical shape
//! cargo run --bin inspect -- --archive twitter.zip show 1050118621198921728
//!
//! # Original text of one tweet
//! cargo run --bin inspect -- --archive twitter.zip text 1050118621198921728
//!
//! # Reproducible sample
//! cargo run --bin inspect -- --archive twitter.zip sample --size 3 --seed 42
//!
//! # Archive sanity check
//! cargo run --bin inspect -- --archive twitter.zip check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`tweet_archive::config`]); `--archive` takes
//! priority over `ARCHIVE_PATH`. `MAX_PAYLOAD_BYTES` and `CACHE_ENABLED`
//! apply here too.

use tweet_archive::application::services::{CatalogService, SampleService};
use tweet_archive::domain::entities::{
    DEFAULT_SAMPLE_SIZE, ResourceContent, ResourceUri, SampleRequest,
};
use tweet_archive::domain::normalizer::normalize;
use tweet_archive::config::{self, Overrides};
use tweet_archive::domain::repositories::TweetRepository;
use tweet_archive::server::build_state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Inspect a Twitter/X export archive.
#[derive(Parser)]
#[command(name = "inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the export zip
    #[arg(short, long, env = "ARCHIVE_PATH", global = true)]
    archive: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most recent tweets
    List {
        /// Number of tweets to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one tweet with expanded links
    Show {
        /// Tweet id
        id: String,
    },

    /// Print the original text of one tweet
    Text {
        /// Tweet id
        id: String,
    },

    /// Draw a random sample of sanitized original tweets
    Sample {
        /// Number of tweets to sample
        #[arg(short, long, default_value_t = 5)]
        size: usize,

        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Open the archive and report record counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load(Overrides {
        archive_path: cli.archive,
        ..Overrides::default()
    })?;

    let repository: Arc<dyn TweetRepository> = build_state(&config).repository;

    match cli.command {
        Commands::List { limit } => list_tweets(repository, limit).await?,
        Commands::Show { id } => show_tweet(repository, &id).await?,
        Commands::Text { id } => show_text(repository, &id).await?,
        Commands::Sample { size, seed } => sample_tweets(repository, size, seed).await?,
        Commands::Check => check_archive(repository).await?,
    }

    Ok(())
}

/// Lists the newest tweets, one per line.
///
/// # Output Format
///
/// ```text
/// 📋 Recent tweets
///
///   1050118621198921728  2018-10-10  @alice  Just setting up my archive
/// ```
async fn list_tweets(repository: Arc<dyn TweetRepository>, limit: usize) -> Result<()> {
    println!("{}", "📋 Recent tweets".bright_blue().bold());
    println!();

    let tweets = repository
        .load_recent()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read archive: {}", e))?;

    if tweets.is_empty() {
        println!("{}", "  No tweets found".yellow());
        return Ok(());
    }

    for raw in tweets.iter().take(limit) {
        let tweet = normalize(raw);
        let date = raw
            .published_at()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "  {:<20} {}  {}  {}",
            tweet.id.bright_black(),
            date.cyan(),
            format!("@{}", tweet.username).green(),
            one_line(&tweet.text, 80)
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        limit.min(tweets.len()).to_string().bright_white().bold(),
        tweets.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_tweet(repository: Arc<dyn TweetRepository>, id: &str) -> Result<()> {
    let catalog = CatalogService::new(repository);

    let content = catalog
        .get_tweet(&ResourceUri::tweet(id), id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read archive: {}", e))?;

    print_content(&content)
}

async fn show_text(repository: Arc<dyn TweetRepository>, id: &str) -> Result<()> {
    let catalog = CatalogService::new(repository);

    let content = catalog
        .get_tweet_text(&ResourceUri::tweet_text(id), id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read archive: {}", e))?;

    match content {
        ResourceContent::Text { text, .. } => println!("{}", text),
        other => print_content(&other)?,
    }

    Ok(())
}

async fn sample_tweets(
    repository: Arc<dyn TweetRepository>,
    size: usize,
    seed: Option<u64>,
) -> Result<()> {
    let sampler = match seed {
        Some(seed) => SampleService::with_seed(repository, seed),
        None => SampleService::new(repository),
    };

    let sample = sampler
        .sample_texts(SampleRequest::new(size, DEFAULT_SAMPLE_SIZE))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read archive: {}", e))?;

    println!("{}", "🎲 Sample".bright_blue().bold());
    println!();

    if sample.is_empty() {
        println!("{}", "  No original tweets to sample".yellow());
        return Ok(());
    }

    for (i, text) in sample.iter().enumerate() {
        println!("  {} {}", format!("{:>2}.", i + 1).bright_black(), text);
    }
    println!();

    Ok(())
}

/// Opens the archive and summarizes its contents.
///
/// Shows:
/// - Total number of records
/// - Originals vs retweets
/// - Newest and oldest timestamps
async fn check_archive(repository: Arc<dyn TweetRepository>) -> Result<()> {
    println!("{}", "🔍 Checking archive...".bright_blue().bold());
    println!();

    repository
        .health_check()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("  {} Archive opened, tweets entry present", "✓".green());

    let tweets = repository
        .load_recent()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("  {} Payload decoded", "✓".green());
    println!();

    let reshares = tweets.iter().filter(|tweet| tweet.is_reshare()).count();
    let undated = tweets
        .iter()
        .filter(|tweet| tweet.published_at().is_none())
        .count();

    println!("  Tweets:    {}", tweets.len().to_string().bright_white().bold());
    println!("  Originals: {}", (tweets.len() - reshares).to_string().cyan());
    println!("  Retweets:  {}", reshares.to_string().bright_black());
    if undated > 0 {
        println!("  Undated:   {}", undated.to_string().yellow());
    }

    let dated: Vec<_> = tweets.iter().filter_map(|tweet| tweet.published_at()).collect();
    if let (Some(newest), Some(oldest)) = (dated.first(), dated.last()) {
        println!("  Newest:    {}", newest.to_rfc3339().bright_black());
        println!("  Oldest:    {}", oldest.to_rfc3339().bright_black());
    }

    println!();
    println!("{}", "✅ Archive OK".green().bold());

    Ok(())
}

fn print_content(content: &ResourceContent) -> Result<()> {
    let json = serde_json::to_string_pretty(content).context("Failed to render tweet")?;
    println!("{}", json);
    Ok(())
}

fn one_line(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        flat
    } else {
        let truncated: String = flat.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
