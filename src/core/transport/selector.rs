//! Transport selection: network first, STDIO as the fallback.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error};

use super::config::{HttpConfig, TransportConfig, TransportMode};
use super::stdio::StdioTransport;
use super::TransportResult;
use crate::core::McpServer;

#[cfg(feature = "http")]
pub use super::http::HttpTransport;

/// Stand-in for the network transport when the `http` feature is off.
///
/// It has no values, so `Selected::Network` can never be constructed.
#[cfg(not(feature = "http"))]
#[derive(Debug)]
pub enum HttpTransport {}

#[cfg(not(feature = "http"))]
impl HttpTransport {
    async fn run(self, _server: McpServer, _observer: ErrorObserver) -> TransportResult<()> {
        match self {}
    }
}

/// Which kind of transport ended up serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Network,
    Pipe,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Network => write!(f, "HTTP"),
            TransportKind::Pipe => write!(f, "STDIO"),
        }
    }
}

/// The transport chosen for this run.
#[derive(Debug)]
pub enum Selected {
    /// Bound HTTP listener.
    Network(HttpTransport),
    /// Standard input/output.
    Pipe(StdioTransport),
}

impl Selected {
    pub fn kind(&self) -> TransportKind {
        match self {
            Selected::Network(_) => TransportKind::Network,
            Selected::Pipe(_) => TransportKind::Pipe,
        }
    }

    /// Serve `server` until the transport shuts down.
    ///
    /// Errors raised while serving individual requests go to an
    /// [`ErrorObserver`]; only failures of the transport itself are returned.
    pub async fn serve(self, server: McpServer) -> TransportResult<()> {
        let observer = ErrorObserver::new(self.kind());
        match self {
            Selected::Network(transport) => transport.run(server, observer).await,
            Selected::Pipe(transport) => transport.run(server, observer).await,
        }
    }
}

/// Logs transport-level errors without stopping the server.
#[derive(Debug, Clone)]
pub struct ErrorObserver {
    transport: TransportKind,
    errors: Arc<AtomicU64>,
}

impl ErrorObserver {
    pub fn new(transport: TransportKind) -> Self {
        Self {
            transport,
            errors: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record one error.
    pub fn observe(&self, err: &dyn fmt::Display) {
        let count = self.errors.fetch_add(1, Ordering::Relaxed) + 1;
        error!(transport = %self.transport, errors = count, "Transport error: {}", err);
    }

    /// Number of errors observed so far.
    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}

/// Decide between a network attempt and the pipe fallback.
///
/// A failed network attempt is logged at debug level and absorbed; the pipe
/// is only constructed in that case, and its own failure is returned.
pub fn choose(
    network_attempt: TransportResult<HttpTransport>,
    make_pipe: impl FnOnce() -> TransportResult<StdioTransport>,
) -> TransportResult<Selected> {
    match network_attempt {
        Ok(network) => Ok(Selected::Network(network)),
        Err(e) => {
            debug!("Network transport unavailable ({}), falling back to STDIO", e);
            make_pipe().map(Selected::Pipe)
        }
    }
}

/// Select a transport according to the configured mode.
pub async fn select(config: &TransportConfig) -> TransportResult<Selected> {
    match config.mode {
        TransportMode::Stdio => StdioTransport::open().map(Selected::Pipe),
        TransportMode::Http => bind_network(&config.http).await.map(Selected::Network),
        TransportMode::Auto => choose(bind_network(&config.http).await, StdioTransport::open),
    }
}

#[cfg(feature = "http")]
async fn bind_network(config: &HttpConfig) -> TransportResult<HttpTransport> {
    HttpTransport::bind(config).await
}

#[cfg(not(feature = "http"))]
async fn bind_network(_config: &HttpConfig) -> TransportResult<HttpTransport> {
    Err(super::TransportError::unavailable(
        "built without the `http` feature",
    ))
}
