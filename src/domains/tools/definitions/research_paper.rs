//! Exa research paper search tool.

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

/// Parameters for the research paper search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResearchPaperParams {
    #[schemars(description = "Research topic or keywords")]
    pub query: String,

    #[schemars(description = "Number of papers to return (default: 5, max: 100)")]
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    #[schemars(description = "Characters of paper text per result (default: 3000)")]
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,
}

fn default_max_characters() -> usize {
    crate::domains::exa::DEFAULT_MAX_CHARACTERS
}

/// Academic paper search restricted to the `research paper` category.
pub struct ResearchPaperSearchTool {
    client: Arc<ExaClient>,
}

impl ResearchPaperSearchTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for ResearchPaperSearchTool {
    type Params = ResearchPaperParams;

    const ID: &'static str = "research_paper_search_exa";
    const NAME: &'static str = "Research Paper Search";
    const DESCRIPTION: &'static str = "Search academic papers and research using Exa AI. Returns paper titles, authors, publication dates and text excerpts.";
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("query", &params.query)
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let request = SearchRequest::new(&params.query, validate_num_results(params.num_results))
            .category(Category::ResearchPaper)
            .max_characters(params.max_characters);
        run_search(&self.client, "Research paper search", request).await
    }
}
