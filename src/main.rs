use std::path::PathBuf;

use clap::Parser;
use tweet_archive::config::{self, Overrides, Transport};
use tweet_archive::{logging, server};

/// Serves a Twitter/X export archive over the Model Context Protocol.
#[derive(Parser)]
#[command(name = "tweet-archive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the export zip (falls back to ARCHIVE_PATH)
    archive: Option<PathBuf>,

    /// Transport to serve on
    #[arg(long, value_enum)]
    transport: Option<Transport>,

    /// Bind address for the HTTP transport
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load(Overrides {
        archive_path: cli.archive,
        transport: cli.transport,
        listen_addr: cli.listen,
    })?;

    logging::init(&config.log_level, &config.log_format)?;
    config.print_summary();

    server::run(config).await
}
