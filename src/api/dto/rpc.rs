//! JSON-RPC 2.0 envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, codes};

pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming request or notification.
///
/// A message without `id` is a notification and gets no response. A
/// present `id` must be a string or a number.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Parses one raw message.
    ///
    /// # Errors
    ///
    /// Returns the ready-to-send error response for malformed JSON (`-32700`)
    /// or a value that is not a JSON-RPC 2.0 request (`-32600`), including one
    /// whose `id` is `null` or not a string or number.
    pub fn parse(raw: &str) -> Result<Self, JsonRpcResponse> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            JsonRpcResponse::failure(Value::Null, RpcError::parse_error(e.to_string()))
        })?;

        let id = match value.get("id") {
            None => Value::Null,
            Some(id) if id.is_string() || id.is_number() => id.clone(),
            Some(_) => {
                return Err(JsonRpcResponse::failure(
                    Value::Null,
                    RpcError::invalid_request("id must be a string or a number"),
                ));
            }
        };

        if value.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(JsonRpcResponse::failure(
                id,
                RpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| JsonRpcResponse::failure(id, RpcError::invalid_request(e.to_string())))
    }
}

/// Outgoing response: exactly one of `result` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", reason))
    }

    pub fn invalid_request(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("Invalid request: {}", reason))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    pub fn internal(reason: impl std::fmt::Display) -> Self {
        Self::new(codes::INTERNAL_ERROR, format!("Internal error: {}", reason))
    }
}

impl From<AppError> for RpcError {
    fn from(err: AppError) -> Self {
        Self {
            code: err.rpc_code(),
            message: err.to_string(),
            data: Some(err.details()),
        }
    }
}
