//! Model Context Protocol payloads carried inside JSON-RPC results.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::entities::{ResourceContent, TWEET_LIST_URI};

/// Newest protocol revision this server speaks.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

/// Protocol revisions accepted during `initialize`.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub const SERVER_NAME: &str = "Twitter Archive MCP";

pub const SAMPLE_TOOL_NAME: &str = "sample_tweet_texts";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Echoes the client's protocol version when supported, otherwise offers
    /// the latest one.
    pub fn negotiate(params: &InitializeParams) -> Self {
        let protocol_version = params
            .protocol_version
            .as_deref()
            .filter(|version| SUPPORTED_PROTOCOL_VERSIONS.contains(version))
            .unwrap_or(LATEST_PROTOCOL_VERSION)
            .to_string();

        Self {
            protocol_version,
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo::default(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ServerCapabilities {
    pub resources: Capability,
    pub tools: Capability,
}

/// Advertised capability without sub-features; serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub struct Capability {}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplateDescriptor {
    pub uri_template: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct ListResourcesResult {
    pub resources: Vec<ResourceDescriptor>,
}

impl ListResourcesResult {
    pub fn catalog() -> Self {
        Self {
            resources: vec![ResourceDescriptor {
                uri: TWEET_LIST_URI.to_string(),
                name: "tweet-list".to_string(),
                description: "Every tweet in the archive, most recent first".to_string(),
                mime_type: "application/json".to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourceTemplatesResult {
    pub resource_templates: Vec<ResourceTemplateDescriptor>,
}

impl ListResourceTemplatesResult {
    pub fn catalog() -> Self {
        Self {
            resource_templates: vec![
                ResourceTemplateDescriptor {
                    uri_template: "tweet://{id}".to_string(),
                    name: "tweet".to_string(),
                    description: "A single tweet with expanded links".to_string(),
                    mime_type: "application/json".to_string(),
                },
                ResourceTemplateDescriptor {
                    uri_template: "tweet-text://{id}".to_string(),
                    name: "tweet-text".to_string(),
                    description: "The original text of a single tweet".to_string(),
                    mime_type: "text/plain".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<ToolDescriptor>,
}

impl ListToolsResult {
    pub fn catalog() -> Self {
        Self {
            tools: vec![ToolDescriptor {
                name: SAMPLE_TOOL_NAME.to_string(),
                description: "Returns a random sample of original tweet texts with mentions, \
                              hashtags and links replaced by placeholders"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "sampleSize": {
                            "type": "string",
                            "description": "Number of tweets to sample (default 5)"
                        }
                    }
                }),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(message)],
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}
