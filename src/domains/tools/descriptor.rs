//! Tool descriptors: the uniform record the registry stores for each tool.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use tracing::debug;

use super::error::ToolError;
use super::handlers::ToolHandler;

/// Future returned by a type-erased tool handler.
pub type ToolFuture = BoxFuture<'static, Result<CallToolResult, ToolError>>;

type DynHandler = Arc<dyn Fn(JsonObject) -> ToolFuture + Send + Sync>;

/// Static description of one tool plus its callable handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    enabled_by_default: bool,
    handler: DynHandler,
}

impl ToolDescriptor {
    /// Build a descriptor from a typed handler.
    ///
    /// The returned handler validates arguments against `H::Params` before
    /// `invoke` runs; a validation failure never reaches the tool.
    pub fn from_handler<H: ToolHandler>(tool: H) -> Self {
        let tool = Arc::new(tool);
        let handler: DynHandler = Arc::new(move |args: JsonObject| {
            let tool = tool.clone();
            async move {
                let params = H::validate(args)?;
                debug!(tool = H::ID, "Arguments validated");
                Ok::<_, ToolError>(tool.invoke(params).await)
            }
            .boxed()
        });

        Self {
            id: H::ID,
            name: H::NAME,
            description: H::DESCRIPTION,
            input_schema: cached_schema_for_type::<H::Params>(),
            enabled_by_default: H::ENABLED_BY_DEFAULT,
            handler,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    pub fn enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }

    /// Validate `args` and run the handler.
    pub fn call(&self, args: JsonObject) -> ToolFuture {
        (self.handler)(args)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.id.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.name.into()),
        }
    }

    /// Create a ToolRoute for the rmcp tool router.
    pub fn to_route<S>(&self) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        let descriptor = self.clone();
        ToolRoute::new_dyn(self.to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let call = descriptor.call(args);
            async move { call.await.map_err(McpError::from) }.boxed()
        })
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled_by_default", &self.enabled_by_default)
            .finish_non_exhaustive()
    }
}
