//! Tracing subscriber setup.
//!
//! Logs always go to stderr: with the stdio transport, stdout carries
//! protocol messages only.

use std::io::IsTerminal;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `log_level` is an `EnvFilter` directive (e.g. `info` or
/// `tweet_archive=debug`); an unparsable directive falls back to `info`.
/// `log_format` is `text` or `json`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder
            .with_ansi(std::io::stderr().is_terminal())
            .try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
