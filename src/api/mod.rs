//! Protocol layer: JSON-RPC messages in, catalog and tool calls out.
//!
//! Both transports feed the same dispatcher
//! ([`handlers::rpc::handle_message`]).
//!
//! # Modules
//!
//! - [`dto`] - JSON-RPC envelopes and MCP payloads
//! - [`handlers`] - Dispatcher plus HTTP handlers
//! - [`middleware`] - HTTP request tracing
//! - [`routes`] - Route configuration
//! - [`stdio`] - Line-delimited stdin/stdout transport

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod stdio;
