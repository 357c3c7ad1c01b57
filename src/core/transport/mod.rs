//! Transport layer for the MCP server.
//!
//! Two transports are available:
//! - **HTTP**: HTTP server with JSON-RPC over POST requests - feature: `http`
//! - **STDIO**: Standard input/output, always compiled in
//!
//! In `auto` mode the server tries HTTP first and falls back to STDIO when
//! the listener cannot be bound (or HTTP is compiled out). Each transport
//! handles the connection lifecycle and delegates message processing to the
//! MCP server handler.

mod config;
mod error;
pub mod selector;
mod service;
pub mod stdio;

#[cfg(feature = "http")]
pub mod http;

pub use config::{DEFAULT_PORT, HttpConfig, TransportConfig, TransportMode};
pub use error::{TransportError, TransportResult};
pub use selector::{ErrorObserver, HttpTransport, Selected, TransportKind, choose, select};
pub use service::TransportService;
pub use stdio::StdioTransport;
