//! Exa company research tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{default_num_results, run_search, validate_num_results};
use crate::domains::exa::ExaClient;
use crate::domains::exa::types::{Category, Livecrawl, SearchRequest};
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{ToolHandler, require_non_blank};

/// Parameters for the company research tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyResearchParams {
    #[schemars(description = "Name of the company to research")]
    pub company_name: String,

    #[schemars(description = "Number of sources to return (default: 5, max: 100)")]
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

/// Company research restricted to the `company` category.
pub struct CompanyResearchTool {
    client: Arc<ExaClient>,
}

impl CompanyResearchTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CompanyResearchTool {
    type Params = CompanyResearchParams;

    const ID: &'static str = "company_research_exa";
    const NAME: &'static str = "Company Research";
    const DESCRIPTION: &'static str = "Research a company using Exa AI. Finds company websites and pages describing its products, funding, team and news.";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("company_name", &params.company_name)
    }

    #[instrument(skip_all, fields(company = %params.company_name))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let request = SearchRequest::new(
            format!("{} company", params.company_name.trim()),
            validate_num_results(params.num_results),
        )
        .category(Category::Company)
        .livecrawl(Livecrawl::Fallback);
        run_search(&self.client, "Company research", request).await
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
    fn test_rejects_blank_company() {
        let err = CompanyResearchTool::validate(args(json!({ "company_name": "" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_sends_company_category() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({
                "query": "Exa company",
                "category": "company",
                "contents": { "livecrawl": "fallback" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "url": "https://exa.ai", "title": "Exa" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CompanyResearchTool::new(exa_client_for(&server));
        let params = CompanyResearchTool::validate(args(json!({ "company_name": " Exa " }))).unwrap();
        let result = tool.invoke(params).await;
        assert!(text_of(&result).contains("https://exa.ai"));
    }
}
