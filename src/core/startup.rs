//! Command line interface and startup sequencing.
//!
//! Listing mode needs no credentials. Serving requires `EXA_API_KEY`, checked
//! before any tool is registered.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use super::config::Config;
use super::error::Result;
use super::server::McpServer;
use crate::domains::exa::ExaClient;
use crate::domains::tools::{ToolRegistry, parse_requested};

/// Exa search tools for MCP clients.
#[derive(Debug, Parser)]
#[command(name = "exa-mcp-server", version, about)]
pub struct Cli {
    /// Comma-separated ids of the tools to enable (defaults when omitted)
    #[arg(long, value_name = "IDS")]
    pub tools: Option<String>,

    /// Print every available tool and exit
    #[arg(long)]
    pub list_tools: bool,
}

/// What `main` should do after startup checks.
pub enum Launch {
    /// Print this listing and exit.
    ListTools(String),
    /// Run this server.
    Serve(McpServer),
}

/// Validate configuration and build whatever the command line asks for.
pub fn prepare(cli: &Cli, config: Config) -> Result<Launch> {
    if cli.list_tools {
        let client = ExaClient::new(&config.exa, None)?;
        let registry = ToolRegistry::exa(Arc::new(client))?;
        return Ok(Launch::ListTools(render_listing(&registry)));
    }

    let api_key = config.credentials.require_exa_api_key()?.to_string();
    let client = ExaClient::new(&config.exa, Some(api_key))?;
    info!("Using Exa API at {}", client.base_url());

    let registry = Arc::new(ToolRegistry::exa(Arc::new(client))?);
    let requested = cli
        .tools
        .as_deref()
        .map(parse_requested)
        .unwrap_or_default();

    Ok(Launch::Serve(McpServer::initialize(config, registry, requested)))
}

/// Human-readable table of every tool in the registry.
pub fn render_listing(registry: &ToolRegistry) -> String {
    let mut out = format!("{:<28} {:<24} {}\n", "ID", "NAME", "DEFAULT");

    for tool in registry.all() {
        let default = if tool.enabled_by_default() { "on" } else { "off" };
        out.push_str(&format!(
            "{:<28} {:<24} {}\n    {}\n",
            tool.id(),
            tool.name(),
            default,
            tool.description()
        ));
    }

    out
}
