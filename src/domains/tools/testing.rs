//! Test doubles shared by the tools domain and the server tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, RawContent};
use schemars::JsonSchema;
use serde::Deserialize;

use super::error::ToolError;
use super::handlers::{ToolHandler, require_non_blank};
use super::{ToolDescriptor, ToolRegistry};

/// Return the text of the first content block.
pub fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    pub message: String,
}

/// Echoes its message and counts invocations.
pub struct EchoTool {
    calls: Arc<AtomicUsize>,
}

impl EchoTool {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl ToolHandler for EchoTool {
    type Params = EchoParams;

    const ID: &'static str = "echo";
    const NAME: &'static str = "Echo";
    const DESCRIPTION: &'static str = "Echo a message back";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("message", &params.message)
    }

    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CallToolResult::success(vec![Content::text(format!("echo: {}", params.message))])
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Declare a no-argument tool that answers with its own id.
macro_rules! fake_tool {
    ($ty:ident, $id:literal, $default:literal) => {
        pub struct $ty;

        #[async_trait]
        impl ToolHandler for $ty {
            type Params = NoParams;

            const ID: &'static str = $id;
            const NAME: &'static str = $id;
            const DESCRIPTION: &'static str = concat!("Fake tool ", $id);
            const ENABLED_BY_DEFAULT: bool = $default;

            async fn invoke(&self, _params: Self::Params) -> CallToolResult {
                CallToolResult::success(vec![Content::text($id)])
            }
        }
    };
}

fake_tool!(AlphaTool, "alpha", true);
fake_tool!(BetaTool, "beta", false);
fake_tool!(SearchTool, "search", false);
fake_tool!(GammaTool, "gamma", true);

/// Registry with `alpha` (on), `beta` (off), `search` (off), `gamma` (on).
pub fn fake_registry() -> ToolRegistry {
    ToolRegistry::builder()
        .register(ToolDescriptor::from_handler(AlphaTool))
        .and_then(|b| b.register(ToolDescriptor::from_handler(BetaTool)))
        .and_then(|b| b.register(ToolDescriptor::from_handler(SearchTool)))
        .and_then(|b| b.register(ToolDescriptor::from_handler(GammaTool)))
        .expect("fake tool ids are unique")
        .build()
}

/// Exa client pointed at a wiremock server, with a test key.
pub fn exa_client_for(server: &wiremock::MockServer) -> Arc<crate::domains::exa::ExaClient> {
    let config = crate::core::config::ExaConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    };
    Arc::new(
        crate::domains::exa::ExaClient::new(&config, Some("test-key".to_string()))
            .expect("client builds"),
    )
}

/// Arguments object from a `json!` literal.
pub fn args(value: serde_json::Value) -> rmcp::model::JsonObject {
    value.as_object().cloned().expect("arguments must be an object")
}
