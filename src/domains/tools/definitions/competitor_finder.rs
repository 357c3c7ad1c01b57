//! Exa competitor finder tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{default_num_results, run_search, validate_num_results};
use crate::domains::exa::ExaClient;
use crate::domains::exa::types::{Category, SearchRequest};
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{ToolHandler, require_non_blank};

/// Parameters for the competitor finder tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompetitorFinderParams {
    #[schemars(description = "What the company does, e.g. 'web search API for AI applications'")]
    pub query: String,

    #[schemars(description = "The company's own domain, excluded from results (e.g. 'exa.ai')")]
    #[serde(default)]
    pub exclude_domain: Option<String>,

    #[schemars(description = "Number of competitors to return (default: 5, max: 100)")]
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

/// Find companies offering similar products or services.
pub struct CompetitorFinderTool {
    client: Arc<ExaClient>,
}

impl CompetitorFinderTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CompetitorFinderTool {
    type Params = CompetitorFinderParams;

    const ID: &'static str = "competitor_finder_exa";
    const NAME: &'static str = "Competitor Finder";
    const DESCRIPTION: &'static str = "Find competitors of a company using Exa AI. Describe what the company does (not its name) and optionally exclude its own domain.";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("query", &params.query)
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let mut request =
            SearchRequest::new(&params.query, validate_num_results(params.num_results))
                .category(Category::Company);

        let excluded = params
            .exclude_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        if let Some(domain) = excluded {
            request = request.exclude_domain(domain);
        }

        run_search(&self.client, "Competitor search", request).await
    }
}
