//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP, used when no network listener
//! can be set up.

use rmcp::ServiceExt;
use tokio::io::{Stdin, Stdout};
use tracing::info;

use super::selector::ErrorObserver;
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
#[derive(Debug)]
pub struct StdioTransport {
    io: (Stdin, Stdout),
}

impl StdioTransport {
    /// Take the process's stdin and stdout.
    pub fn open() -> TransportResult<Self> {
        Ok(Self {
            io: rmcp::transport::stdio(),
        })
    }

    /// Run the STDIO transport until the client disconnects.
    pub async fn run(self, server: McpServer, observer: ErrorObserver) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(self.io)
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        match service.waiting().await {
            Ok(reason) => info!("STDIO transport finished: {:?}", reason),
            Err(e) => observer.observe(&e),
        }

        Ok(())
    }
}
