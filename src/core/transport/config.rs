//! Transport configuration types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default HTTP port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Transport configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportConfig {
    /// How the transport is chosen.
    pub mode: TransportMode,

    /// Settings for the network transport.
    pub http: HttpConfig,
}

/// Transport selection policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Try HTTP first, fall back to STDIO if it cannot be set up.
    #[default]
    Auto,

    /// STDIO only.
    Stdio,

    /// HTTP only; failing to bind is fatal.
    Http,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown transport '{}'", other)),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Address to bind, as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TransportConfig {
    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from a variable lookup function.
    ///
    /// Reads `MCP_TRANSPORT`, `PORT`, `MCP_HTTP_HOST`, `MCP_HTTP_PATH` and
    /// `MCP_HTTP_CORS`. Unparseable values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = match lookup("MCP_TRANSPORT") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!("{}, using auto", e);
                TransportMode::Auto
            }),
            None => TransportMode::Auto,
        };

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid PORT '{}', using {}", value, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let host = lookup("MCP_HTTP_HOST").unwrap_or_else(default_host);
        let rpc_path = lookup("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path);
        let enable_cors = lookup("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            mode,
            http: HttpConfig {
                port,
                host,
                rpc_path,
                enable_cors,
            },
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self.mode {
            TransportMode::Auto => format!(
                "auto (HTTP on {}{}, STDIO fallback)",
                self.http.address(),
                self.http.rpc_path
            ),
            TransportMode::Stdio => "STDIO".to_string(),
            TransportMode::Http => format!("HTTP on {}{}", self.http.address(), self.http.rpc_path),
        }
    }
}
