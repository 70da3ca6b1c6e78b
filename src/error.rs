//! Application error type shared by the archive reader, services and protocol layer.

use serde_json::{Value, json};

/// JSON-RPC error codes used by the protocol layer.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
    /// MCP-specific code for an unknown resource URI.
    pub const RESOURCE_NOT_FOUND: i64 = -32002;
}

/// Errors surfaced by a single catalog or tool call.
///
/// A tweet missing from an otherwise valid archive is not an error; the
/// catalog folds it into a regular result (see
/// [`crate::domain::entities::ResourceContent::not_found`]).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The archive container could not be opened or read.
    #[error("Failed to open archive {path}: {reason}")]
    ArchiveOpen { path: String, reason: String },

    /// The archive opened but the payload entry is missing.
    #[error("{entry} not found in archive")]
    EntryNotFound { entry: String },

    /// The payload entry could not be decoded into records.
    #[error("Failed to decode tweet payload: {0}")]
    PayloadDecode(String),

    /// The requested URI does not belong to any known resource.
    #[error("Unknown resource: {0}")]
    ResourceNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn archive_open(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self::ArchiveOpen {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn entry_not_found(entry: impl Into<String>) -> Self {
        Self::EntryNotFound {
            entry: entry.into(),
        }
    }

    pub fn payload_decode(reason: impl Into<String>) -> Self {
        Self::PayloadDecode(reason.into())
    }

    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    /// Returns the JSON-RPC error code for this error.
    pub fn rpc_code(&self) -> i64 {
        match self {
            AppError::ResourceNotFound(_) => codes::RESOURCE_NOT_FOUND,
            AppError::InvalidParams(_) => codes::INVALID_PARAMS,
            AppError::ArchiveOpen { .. }
            | AppError::EntryNotFound { .. }
            | AppError::PayloadDecode(_)
            | AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Short machine-readable kind, attached as JSON-RPC error data.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ArchiveOpen { .. } => "archive_open",
            AppError::EntryNotFound { .. } => "entry_not_found",
            AppError::PayloadDecode(_) => "payload_decode",
            AppError::ResourceNotFound(_) => "resource_not_found",
            AppError::InvalidParams(_) => "invalid_params",
            AppError::Internal(_) => "internal",
        }
    }

    /// Structured details sent alongside the error message.
    pub fn details(&self) -> Value {
        match self {
            AppError::ArchiveOpen { path, .. } => json!({ "kind": self.kind(), "path": path }),
            AppError::EntryNotFound { entry } => json!({ "kind": self.kind(), "entry": entry }),
            AppError::ResourceNotFound(uri) => json!({ "kind": self.kind(), "uri": uri }),
            _ => json!({ "kind": self.kind() }),
        }
    }
}
