//! Domains module containing business logic organized by bounded contexts.
//!
//! - **exa**: typed client for the upstream Exa search API
//! - **tools**: MCP tools, their registry and enablement policy

pub mod exa;
pub mod tools;
