//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` capability every tool implements
//! - `descriptor.rs` - Type-erased descriptor stored in the registry
//! - `registry.rs` - Immutable registry of all known tools
//! - `enablement.rs` - Picks the tools active for one run
//! - `router.rs` - Registers active tools with the rmcp ToolRouter
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::exa()`
//!
//! Nothing else needs to change: the server registers whatever the
//! enablement resolver returns.

pub mod definitions;
mod descriptor;
pub mod enablement;
mod error;
pub mod handlers;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::{ToolDescriptor, ToolFuture};
pub use enablement::{Enablement, parse_requested, resolve};
pub use error::ToolError;
pub use handlers::ToolHandler;
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use router::register_routes;
