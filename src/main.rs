//! MCP Server Entry Point
//!
//! Parses the command line, loads configuration, initializes logging and
//! either prints the tool listing or starts the server.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use exa_mcp_server::core::{Cli, Config, Launch, prepare};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    match start(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli, config: Config) -> anyhow::Result<()> {
    let name = config.server.name.clone();
    let version = config.server.version.clone();

    match prepare(&cli, config).context("Startup failed")? {
        Launch::ListTools(listing) => {
            print!("{}", listing);
        }
        Launch::Serve(server) => {
            info!("Starting {} v{}", name, version);
            server.run().await.context("Server stopped with an error")?;
            info!("Server shutting down");
        }
    }

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// because stdout carries the STDIO transport.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
