//! Application configuration loaded from environment variables and CLI flags.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export ARCHIVE_PATH="$HOME/twitter-2024-01-01.zip"
//! export TRANSPORT="http"
//! export LISTEN="127.0.0.1:3000"
//! ```
//!
//! ## Required
//!
//! - Archive path: first positional CLI argument, or `ARCHIVE_PATH`
//!
//! ## Optional Variables
//!
//! - `TRANSPORT` - `stdio` or `http` (default: `stdio`)
//! - `LISTEN` - Bind address for the HTTP transport (default: `127.0.0.1:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_ENABLED` - Keep decoded snapshots in memory (default: `false`)
//! - `MAX_PAYLOAD_BYTES` - Limit on the decompressed tweets payload (default: 256 MiB)
//! - `DEFAULT_SAMPLE_SIZE` - Sample size when the tool call has none (default: 5, max: 1000)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::entities::DEFAULT_SAMPLE_SIZE;
use crate::infrastructure::archive::DEFAULT_MAX_PAYLOAD_BYTES;

/// How protocol messages reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over `POST /mcp`.
    Http,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => anyhow::bail!("TRANSPORT must be 'stdio' or 'http', got '{}'", other),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Export archive to serve. Empty until supplied by CLI or `ARCHIVE_PATH`.
    pub archive_path: PathBuf,
    pub transport: Transport,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Keep the decoded archive in memory while its size and mtime are unchanged.
    pub cache_enabled: bool,
    /// Upper bound on the decompressed `data/tweets.js` entry.
    pub max_payload_bytes: u64,
    pub default_sample_size: usize,
}

/// Values given on the command line; they take priority over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub archive_path: Option<PathBuf>,
    pub transport: Option<Transport>,
    pub listen_addr: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRANSPORT` is set to an unknown value.
    pub fn from_env() -> Result<Self> {
        let archive_path = env::var_os("ARCHIVE_PATH")
            .map(PathBuf::from)
            .unwrap_or_default();

        let transport = env::var("TRANSPORT")
            .ok()
            .map(|v| v.parse::<Transport>())
            .transpose()
            .context("Failed to load transport configuration")?
            .unwrap_or_default();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_enabled = env::var("CACHE_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let max_payload_bytes = env::var("MAX_PAYLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES);

        let default_sample_size = env::var("DEFAULT_SAMPLE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_SIZE);

        Ok(Self {
            archive_path,
            transport,
            listen_addr,
            log_level,
            log_format,
            cache_enabled,
            max_payload_bytes,
            default_sample_size,
        })
    }

    /// Applies command-line values on top of the environment.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(path) = overrides.archive_path {
            self.archive_path = path;
        }
        if let Some(transport) = overrides.transport {
            self.transport = transport;
        }
        if let Some(listen_addr) = overrides.listen_addr {
            self.listen_addr = listen_addr;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no archive path was given, or it does not point to a file
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `max_payload_bytes` is zero
    /// - `default_sample_size` is outside 1..=1000
    pub fn validate(&self) -> Result<()> {
        if self.archive_path.as_os_str().is_empty() {
            anyhow::bail!("Usage: tweet-archive <path-to-zip-file> (or set ARCHIVE_PATH)");
        }

        if !self.archive_path.is_file() {
            anyhow::bail!("File not found: {}", self.archive_path.display());
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.max_payload_bytes == 0 {
            anyhow::bail!("MAX_PAYLOAD_BYTES must be greater than 0");
        }

        if self.default_sample_size == 0 || self.default_sample_size > 1000 {
            anyhow::bail!(
                "DEFAULT_SAMPLE_SIZE must be between 1 and 1000, got {}",
                self.default_sample_size
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Archive: {}", self.archive_path.display());
        tracing::info!("  Transport: {}", self.transport);
        if self.transport == Transport::Http {
            tracing::info!("  Listen address: {}", self.listen_addr);
        }
        tracing::info!(
            "  Snapshot cache: {}",
            if self.cache_enabled { "enabled" } else { "disabled" }
        );
        tracing::info!("  Max payload bytes: {}", self.max_payload_bytes);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads configuration, applies CLI overrides and validates the result.
///
/// # Errors
///
/// Returns an error if the archive is missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load(overrides: Overrides) -> Result<Config> {
    let mut config = Config::from_env()?;
    config.apply(overrides);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config(archive_path: PathBuf) -> Config {
        Config {
            archive_path,
            transport: Transport::Stdio,
            listen_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cache_enabled: false,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            default_sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    #[test]
    fn test_transport_from_str() {
        assert_eq!("stdio".parse::<Transport>().unwrap(), Transport::Stdio);
        assert_eq!("HTTP".parse::<Transport>().unwrap(), Transport::Http);
        assert!("grpc".parse::<Transport>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let archive = tempfile::NamedTempFile::new().unwrap();
        let mut config = valid_config(archive.path().to_path_buf());

        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:3000".to_string();

        config.default_sample_size = 0;
        assert!(config.validate().is_err());

        config.default_sample_size = 5;
        config.max_payload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_archive_fails() {
        let config = valid_config(PathBuf::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Usage"));

        let config = valid_config(PathBuf::from("/definitely/not/here.zip"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_directory_is_not_an_archive() {
        let dir = tempfile::tempdir().unwrap();
        let config = valid_config(dir.path().to_path_buf());
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("ARCHIVE_PATH", "/tmp/archive.zip");
            env::set_var("TRANSPORT", "http");
            env::set_var("CACHE_ENABLED", "1");
            env::set_var("DEFAULT_SAMPLE_SIZE", "8");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.archive_path, PathBuf::from("/tmp/archive.zip"));
        assert_eq!(config.transport, Transport::Http);
        assert!(config.cache_enabled);
        assert_eq!(config.default_sample_size, 8);

        // Cleanup
        unsafe {
            env::remove_var("ARCHIVE_PATH");
            env::remove_var("TRANSPORT");
            env::remove_var("CACHE_ENABLED");
            env::remove_var("DEFAULT_SAMPLE_SIZE");
        }
    }

    #[test]
    #[serial]
    fn test_invalid_transport_env_fails() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TRANSPORT", "carrier-pigeon");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("TRANSPORT");
        }
    }

    #[test]
    #[serial]
    fn test_cli_overrides_take_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("ARCHIVE_PATH", "/from/env.zip");
            env::set_var("LISTEN", "0.0.0.0:9000");
        }

        let mut config = Config::from_env().unwrap();
        config.apply(Overrides {
            archive_path: Some(PathBuf::from("/from/cli.zip")),
            transport: Some(Transport::Http),
            listen_addr: None,
        });

        assert_eq!(config.archive_path, PathBuf::from("/from/cli.zip"));
        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.listen_addr, "0.0.0.0:9000");

        unsafe {
            env::remove_var("ARCHIVE_PATH");
            env::remove_var("LISTEN");
        }
    }

    #[test]
    #[serial]
    fn test_load_reads_payload_limit_from_env() {
        let archive = tempfile::NamedTempFile::new().unwrap();

        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MAX_PAYLOAD_BYTES", u64::MAX.to_string());
        }

        let config = load(Overrides {
            archive_path: Some(archive.path().to_path_buf()),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(config.max_payload_bytes, u64::MAX);

        unsafe {
            env::remove_var("MAX_PAYLOAD_BYTES");
        }
    }
}
