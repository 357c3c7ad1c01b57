//! Exa web search tool.
//!
//! Real-time web search returning page text for each hit.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{default_num_results, run_search, validate_num_results};
use crate::domains::exa::ExaClient;
use crate::domains::exa::types::{SearchRequest, SearchType};
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{ToolHandler, require_non_blank};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the web search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query.
    #[schemars(description = "Search query")]
    pub query: String,

    /// Number of results to return (default: 5, max: 100).
    #[schemars(description = "Number of results to return (default: 5, max: 100)")]
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Search strategy.
    #[schemars(description = "Search type: 'auto' (default), 'neural' or 'keyword'")]
    #[serde(default)]
    pub search_type: SearchType,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Web search tool backed by Exa `/search`.
pub struct WebSearchTool {
    client: Arc<ExaClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for WebSearchTool {
    type Params = WebSearchParams;

    const ID: &'static str = "web_search_exa";
    const NAME: &'static str = "Web Search (Exa)";
    const DESCRIPTION: &'static str = "Search the web in real time using Exa AI. Returns titles, URLs, publication dates and page text for the most relevant results. Use for current information, news and general questions.";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("query", &params.query)
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let request = SearchRequest::new(&params.query, validate_num_results(params.num_results))
            .search_type(params.search_type);
        run_search(&self.client, "Web search", request).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{args, exa_client_for, text_of};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_params_defaults() {
        let params = WebSearchTool::validate(args(json!({ "query": "rust" }))).unwrap();
        assert_eq!(params.num_results, 5);
        assert_eq!(params.search_type, SearchType::Auto);
    }

    #[test]
    fn test_rejects_missing_query() {
        let err = WebSearchTool::validate(args(json!({ "num_results": 3 }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_rejects_unknown_search_type() {
        let err = WebSearchTool::validate(args(json!({ "query": "rust", "search_type": "magic" })))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({ "query": "rust", "numResults": 100, "type": "keyword" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "url": "https://www.rust-lang.org", "title": "Rust" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = WebSearchTool::new(exa_client_for(&server));
        let params = WebSearchTool::validate(args(json!({
            "query": "rust",
            "num_results": 1000,
            "search_type": "keyword"
        })))
        .unwrap();
        let result = tool.invoke(params).await;

        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("1. Rust - https://www.rust-lang.org"));
    }

    #[tokio::test]
    async fn test_invoke_upstream_failure_is_error_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let tool = WebSearchTool::new(exa_client_for(&server));
        let params = WebSearchTool::validate(args(json!({ "query": "rust" }))).unwrap();
        let result = tool.invoke(params).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("500"));
    }
}
