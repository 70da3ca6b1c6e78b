//! Protocol and HTTP request handlers.

pub mod health;
pub mod mcp;
pub mod rpc;

pub use health::health_handler;
pub use mcp::mcp_handler;
pub use rpc::{dispatch, handle_message};
