//! Exa MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes Exa search tools to
//! AI assistants.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, startup, the server facade and
//!   the transport layer (HTTP first, STDIO fallback)
//! - **domains**: business logic organized by bounded contexts
//!   - **exa**: typed client for the Exa API
//!   - **tools**: tool descriptors, the registry, enablement and the Exa tools
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use exa_mcp_server::core::{Config, McpServer};
//! use exa_mcp_server::domains::exa::ExaClient;
//! use exa_mcp_server::domains::tools::{ToolRegistry, parse_requested};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let key = config.credentials.require_exa_api_key()?.to_string();
//!     let client = Arc::new(ExaClient::new(&config.exa, Some(key))?);
//!     let registry = Arc::new(ToolRegistry::exa(client)?);
//!
//!     let server = McpServer::initialize(config, registry, parse_requested("web_search_exa"));
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
