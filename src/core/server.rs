//! MCP Server implementation and lifecycle management.
//!
//! The server starts with an empty tool router. [`McpServer::setup_tools`]
//! resolves which registry entries are enabled for this run and registers
//! only those, so both transports expose the same tool surface.

use std::collections::BTreeSet;
use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Implementation, JsonObject, ServerCapabilities, ServerInfo, Tool},
    tool_handler,
};
use tracing::{info, instrument, warn};

use super::config::Config;
use super::transport::TransportService;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolRegistry, register_routes, resolve};

/// The main MCP server handler.
///
/// Implements `ServerHandler` from rmcp through the `#[tool_handler]` macro,
/// which dispatches tool calls to the `tool_router` field.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Every tool the server knows about.
    registry: Arc<ToolRegistry>,

    /// Allow-list from `--tools`; empty means "use the defaults".
    requested: Arc<BTreeSet<String>>,

    /// Tools registered by `setup_tools`, in registry order.
    active: Arc<Vec<ToolDescriptor>>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Instructions sent to clients on initialization.
    pub const INSTRUCTIONS: &'static str = "Exa search server. Use the web, research paper, company, LinkedIn, Wikipedia and GitHub search tools to find sources, crawling_exa to read a known URL, and the deep researcher tools for long-running research reports.";

    /// Create a server with no tools registered yet.
    pub fn initialize(
        config: Config,
        registry: Arc<ToolRegistry>,
        requested: BTreeSet<String>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            requested: Arc::new(requested),
            active: Arc::new(Vec::new()),
            tool_router: ToolRouter::new(),
        }
    }

    /// Register the enabled tools and return their ids.
    ///
    /// Requested ids that are not in the registry are logged and skipped.
    /// Fails if a tool is already registered on this server.
    pub fn setup_tools(&mut self) -> Result<Vec<&'static str>, ToolError> {
        let enablement = resolve(&self.requested, &self.registry);

        for id in &enablement.unknown {
            warn!("Ignoring unknown tool '{}' (not in the registry)", id);
        }

        let registered = register_routes(&mut self.tool_router, enablement.active.iter().copied())?;
        self.active = Arc::new(enablement.active.into_iter().cloned().collect());

        if self.requested.is_empty() {
            info!("Enabled {} default tools: {:?}", registered.len(), registered);
        } else {
            info!("Enabled {} requested tools: {:?}", registered.len(), registered);
        }

        Ok(registered)
    }

    /// Register tools, then serve them on the selected transport.
    pub async fn run(mut self) -> super::Result<()> {
        self.setup_tools()?;

        let transport = TransportService::new(self.config.transport.clone());
        transport.run(self).await?;

        Ok(())
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Ids of the tools registered for this run.
    pub fn active_ids(&self) -> Vec<&'static str> {
        self.active.iter().map(ToolDescriptor::id).collect()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List the registered tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.active.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Call a registered tool by name (for HTTP transport).
    ///
    /// Tools that exist in the registry but were not enabled are reported
    /// as not found.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let descriptor = self
            .active
            .iter()
            .find(|d| d.id() == name)
            .ok_or_else(|| ToolError::not_found(name))?;

        descriptor.call(arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            instructions: Some(Self::INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::parse_requested;
    use crate::domains::tools::testing::{args, fake_registry, text_of};

    fn server(tools: &str) -> McpServer {
        McpServer::initialize(
            Config::default(),
            Arc::new(fake_registry()),
            parse_requested(tools),
        )
    }

    #[test]
    fn test_starts_with_no_tools() {
        let server = server("");
        assert!(server.tool_router.list_all().is_empty());
        assert!(server.list_tools().is_empty());
    }

    #[test]
    fn test_requested_tool_only() {
        let mut server = server("search");
        let registered = server.setup_tools().unwrap();

        assert_eq!(registered, vec!["search"]);
        assert!(server.tool_router.has_route("search"));
        assert_eq!(server.tool_router.list_all().len(), 1);
        assert_eq!(server.active_ids(), vec!["search"]);
    }

    #[test]
    fn test_defaults_when_nothing_requested() {
        let mut server = server("");
        assert_eq!(server.setup_tools().unwrap(), vec!["alpha", "gamma"]);

        let titles: Vec<_> = server
            .list_tools()
            .into_iter()
            .map(|t| t.title.unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["alpha", "gamma"]);
    }

    #[test]
    fn test_only_unknown_tools_is_not_an_error() {
        let mut server = server("nonexistent");
        assert!(server.setup_tools().unwrap().is_empty());
        assert!(server.tool_router.list_all().is_empty());
    }

    #[test]
    fn test_setup_twice_is_duplicate() {
        let mut server = server("alpha");
        server.setup_tools().unwrap();
        let err = server.setup_tools().unwrap_err();
        assert!(matches!(err, ToolError::DuplicateId(id) if id == "alpha"));
    }

    #[tokio::test]
    async fn test_run_reports_setup_failure_as_crate_error() {
        let mut server = server("alpha");
        server.setup_tools().unwrap();

        let err = server.run().await.unwrap_err();
        assert!(matches!(
            err,
            crate::core::Error::Tool(ToolError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn test_call_tool_dispatches_active_only() {
        let mut server = server("beta");
        server.setup_tools().unwrap();

        let result = server.call_tool("beta", args(serde_json::json!({}))).await.unwrap();
        assert_eq!(text_of(&result), "beta");

        let err = server
            .call_tool("alpha", args(serde_json::json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let info = server("").get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "exa-search-server");
    }
}
