//! Tool handler capability.
//!
//! Every tool implements [`ToolHandler`]: a typed parameter struct (which also
//! yields the input schema), a `validate` step turning raw JSON arguments into
//! those parameters, and an async `invoke` that does the work.
//! [`ToolDescriptor::from_handler`](super::ToolDescriptor::from_handler) erases
//! the type so the registry can hold every tool uniformly.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;

/// A callable tool with schema-validated input.
#[async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Typed arguments; its JSON schema is the tool's input schema.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Stable identifier, used as the MCP tool name.
    const ID: &'static str;

    /// Human-readable name, exposed as the MCP tool title.
    const NAME: &'static str;

    /// Description shown to clients.
    const DESCRIPTION: &'static str;

    /// Whether the tool is active when no allow-list is given.
    const ENABLED_BY_DEFAULT: bool;

    /// Turn raw arguments into validated parameters.
    ///
    /// The default deserializes against [`Self::Params`] and then applies
    /// [`Self::check`].
    fn validate(args: JsonObject) -> Result<Self::Params, ToolError> {
        let params: Self::Params = serde_json::from_value(serde_json::Value::Object(args))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        Self::check(&params)?;
        Ok(params)
    }

    /// Constraints the schema cannot express (non-blank strings, URL shape).
    fn check(_params: &Self::Params) -> Result<(), ToolError> {
        Ok(())
    }

    /// Run the tool. Upstream failures are reported as error results.
    async fn invoke(&self, params: Self::Params) -> CallToolResult;
}

/// Reject blank string arguments.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("query", "rust").is_ok());
        let err = require_non_blank("query", "  \t").unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(ref m) if m.contains("query")));
    }
}
