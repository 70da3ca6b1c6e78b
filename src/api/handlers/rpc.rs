//! JSON-RPC dispatcher shared by the stdio and HTTP transports.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::api::dto::mcp::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult,
    ListResourceTemplatesResult, ListResourcesResult, ListToolsResult, ReadResourceParams,
    ReadResourceResult, SAMPLE_TOOL_NAME,
};
use crate::api::dto::rpc::{JsonRpcRequest, JsonRpcResponse, RpcError};
use crate::domain::entities::SampleRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Handles one raw message.
///
/// Returns `None` for notifications, which never get a response.
pub async fn handle_message(state: &AppState, raw: &str) -> Option<JsonRpcResponse> {
    match JsonRpcRequest::parse(raw) {
        Ok(request) => dispatch(state, request).await,
        Err(response) => {
            warn!("Rejected message: {:?}", response.error);
            Some(response)
        }
    }
}

/// Routes a parsed request to its method handler.
pub async fn dispatch(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let Some(id) = request.id else {
        debug!("Notification received: {}", request.method);
        return None;
    };

    metrics::counter!("rpc_requests_total", "method" => request.method.clone()).increment(1);
    debug!("Dispatching {} (id {})", request.method, id);

    let params = request.params;
    let result = match request.method.as_str() {
        "initialize" => initialize(params),
        "ping" => Ok(json!({})),
        "resources/list" => to_result(ListResourcesResult::catalog()),
        "resources/templates/list" => to_result(ListResourceTemplatesResult::catalog()),
        "resources/read" => read_resource(state, params).await,
        "tools/list" => to_result(ListToolsResult::catalog()),
        "tools/call" => call_tool(state, params).await,
        other => Err(RpcError::method_not_found(other)),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(error) => {
            metrics::counter!("rpc_errors_total", "method" => request.method).increment(1);
            JsonRpcResponse::failure(id, error)
        }
    })
}

fn initialize(params: Option<Value>) -> Result<Value, RpcError> {
    let params: InitializeParams = match params {
        Some(value) => parse_params(value)?,
        None => InitializeParams::default(),
    };

    to_result(InitializeResult::negotiate(&params))
}

async fn read_resource(state: &AppState, params: Option<Value>) -> Result<Value, RpcError> {
    let params: ReadResourceParams = parse_params(required(params)?)?;

    let contents = state.catalog.read(&params.uri).await.map_err(|e| {
        warn!("resources/read {} failed: {}", params.uri, e);
        RpcError::from(e)
    })?;

    to_result(ReadResourceResult { contents })
}

async fn call_tool(state: &AppState, params: Option<Value>) -> Result<Value, RpcError> {
    let params: CallToolParams = parse_params(required(params)?)?;

    if params.name != SAMPLE_TOOL_NAME {
        return Err(AppError::invalid_params(format!("Unknown tool: {}", params.name)).into());
    }

    let request = SampleRequest::from_arguments(params.arguments.as_ref(), state.default_sample_size);

    let result = match state.sampler.sample_texts(request).await {
        Ok(sample) => {
            let text = serde_json::to_string_pretty(&sample).map_err(RpcError::internal)?;
            CallToolResult::text(text)
        }
        Err(e) => {
            warn!("{} failed: {}", SAMPLE_TOOL_NAME, e);
            CallToolResult::error(e.to_string())
        }
    };

    to_result(result)
}

fn required(params: Option<Value>) -> Result<Value, RpcError> {
    params.ok_or_else(|| AppError::invalid_params("missing params").into())
}

fn parse_params<T: DeserializeOwned>(value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| AppError::invalid_params(e.to_string()).into())
}

fn to_result<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}
