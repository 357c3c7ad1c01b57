//! Exa crawling tool: fetch the contents of one URL.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, search_result};
use crate::domains::exa::types::ContentsRequest;
use crate::domains::exa::{DEFAULT_MAX_CHARACTERS, ExaClient};
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::ToolHandler;

/// Parameters for the crawling tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CrawlingParams {
    #[schemars(description = "Absolute http(s) URL to crawl")]
    pub url: String,

    #[schemars(description = "Maximum characters of page text to return (default: 3000)")]
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,
}

fn default_max_characters() -> usize {
    DEFAULT_MAX_CHARACTERS
}

/// Crawl a page through Exa `/contents`.
pub struct CrawlingTool {
    client: Arc<ExaClient>,
}

impl CrawlingTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CrawlingTool {
    type Params = CrawlingParams;

    const ID: &'static str = "crawling_exa";
    const NAME: &'static str = "Web Crawling";
    const DESCRIPTION: &'static str = "Extract the content of a specific URL using Exa AI. Useful for reading articles, PDFs or any page when the URL is known.";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        let url = Url::parse(params.url.trim())
            .map_err(|e| ToolError::invalid_arguments(format!("Invalid URL '{}': {}", params.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ToolError::invalid_arguments(format!(
                "Unsupported URL scheme '{}': only http and https can be crawled",
                url.scheme()
            )));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(url = %params.url))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        info!("Crawling {}", params.url);
        let request = ContentsRequest::url(params.url.trim(), params.max_characters);

        match self.client.contents(&request).await {
            Ok(response) if response.results.is_empty() => {
                error_result(&format!("No content found for {}", params.url))
            }
            Ok(response) => search_result("Crawled content", response),
            Err(e) => error_result(&format!("Crawling {} failed: {}", params.url, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{args, exa_client_for, text_of};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_validation() {
        assert!(CrawlingTool::validate(args(json!({ "url": "https://exa.ai/blog" }))).is_ok());

        for bad in ["not a url", "ftp://example.com/file", "/relative/path"] {
            let err = CrawlingTool::validate(args(json!({ "url": bad }))).unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)), "{bad} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_crawl_returns_page_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contents"))
            .and(body_partial_json(json!({
                "ids": ["https://exa.ai/blog"],
                "livecrawl": "preferred"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "url": "https://exa.ai/blog",
                    "title": "Blog",
                    "text": "Hello from the blog"
                }]
            })))
            .mount(&server)
            .await;

        let tool = CrawlingTool::new(exa_client_for(&server));
        let params = CrawlingTool::validate(args(json!({ "url": "https://exa.ai/blog" }))).unwrap();
        let result = tool.invoke(params).await;

        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("Hello from the blog"));
    }

    #[tokio::test]
    async fn test_crawl_empty_result_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let tool = CrawlingTool::new(exa_client_for(&server));
        let params = CrawlingTool::validate(args(json!({ "url": "https://exa.ai" }))).unwrap();
        let result = tool.invoke(params).await;
        assert_eq!(result.is_error, Some(true));
    }
}
