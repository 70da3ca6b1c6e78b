//! Data Transfer Objects for protocol messages and the health endpoint.
//!
//! All DTOs use Serde for JSON serialization/deserialization.

pub mod health;
pub mod mcp;
pub mod rpc;
