//! Exa searches restricted to a single site.
//!
//! LinkedIn, Wikipedia and GitHub search differ only in the domain they pass
//! to Exa and in how they present themselves, so one generic tool serves all
//! three. Each site is a zero-sized [`Site`] marker.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use super::common::{default_num_results, run_search, validate_num_results};
use crate::domains::exa::ExaClient;
use crate::domains::exa::types::SearchRequest;
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{ToolHandler, require_non_blank};

/// A site that [`SiteSearchTool`] can search.
pub trait Site: 'static {
    const ID: &'static str;
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Domain passed to Exa as `includeDomains`.
    const DOMAIN: &'static str;

    /// Label used in result headings and error messages.
    const LABEL: &'static str;
}

pub struct LinkedIn;

impl Site for LinkedIn {
    const ID: &'static str = "linkedin_search_exa";
    const NAME: &'static str = "LinkedIn Search";
    const DESCRIPTION: &'static str = "Search LinkedIn profiles and company pages using Exa AI. Useful for finding professionals, roles and company information.";
    const DOMAIN: &'static str = "linkedin.com";
    const LABEL: &'static str = "LinkedIn search";
}

pub struct Wikipedia;

impl Site for Wikipedia {
    const ID: &'static str = "wikipedia_search_exa";
    const NAME: &'static str = "Wikipedia Search";
    const DESCRIPTION: &'static str = "Search Wikipedia articles using Exa AI. Returns article titles, URLs and text excerpts for factual background on a topic.";
    const DOMAIN: &'static str = "wikipedia.org";
    const LABEL: &'static str = "Wikipedia search";
}

pub struct GitHub;

impl Site for GitHub {
    const ID: &'static str = "github_search_exa";
    const NAME: &'static str = "GitHub Search";
    const DESCRIPTION: &'static str =
        "Search GitHub repositories, code and developer profiles using Exa AI.";
    const DOMAIN: &'static str = "github.com";
    const LABEL: &'static str = "GitHub search";
}

pub type LinkedinSearchTool = SiteSearchTool<LinkedIn>;
pub type WikipediaSearchTool = SiteSearchTool<Wikipedia>;
pub type GithubSearchTool = SiteSearchTool<GitHub>;

/// Parameters shared by the site search tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SiteSearchParams {
    #[schemars(description = "What to look for on the site")]
    pub query: String,

    #[schemars(description = "Number of results to return (default: 5, max: 100)")]
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

/// Exa search limited to the domain of `S`.
pub struct SiteSearchTool<S> {
    client: Arc<ExaClient>,
    _site: PhantomData<fn() -> S>,
}

impl<S: Site> SiteSearchTool<S> {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self {
            client,
            _site: PhantomData,
        }
    }
}

#[async_trait]
impl<S: Site> ToolHandler for SiteSearchTool<S> {
    type Params = SiteSearchParams;

    const ID: &'static str = S::ID;
    const NAME: &'static str = S::NAME;
    const DESCRIPTION: &'static str = S::DESCRIPTION;
    const ENABLED_BY_DEFAULT: bool = true;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("query", &params.query)
    }

    #[instrument(skip_all, fields(site = S::DOMAIN, query = %params.query))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let request = SearchRequest::new(&params.query, validate_num_results(params.num_results))
            .include_domain(S::DOMAIN);
        run_search(&self.client, S::LABEL, request).await
    }
}
