//! Tool Registry - central registration of all tools.
//!
//! The registry is populated once through [`ToolRegistryBuilder`] and is
//! read-only afterwards. It is shared as `Arc<ToolRegistry>` with the
//! enablement resolver, the server and the `--list-tools` listing.

use std::sync::Arc;

use tracing::debug;

use super::definitions::{
    CompanyResearchTool, CompetitorFinderTool, CrawlingTool, DeepResearcherCheckTool,
    DeepResearcherStartTool, GithubSearchTool, LinkedinSearchTool, ResearchPaperSearchTool,
    WebSearchTool, WikipediaSearchTool,
};
use super::descriptor::ToolDescriptor;
use super::error::ToolError;
use crate::domains::exa::ExaClient;

/// Ordered, immutable mapping from tool id to descriptor.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

/// Builder used during the initialization phase.
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistryBuilder {
    /// Add a descriptor. Fails if its id is already registered.
    pub fn register(mut self, descriptor: ToolDescriptor) -> Result<Self, ToolError> {
        if self.tools.iter().any(|t| t.id() == descriptor.id()) {
            return Err(ToolError::duplicate_id(descriptor.id()));
        }
        debug!("Registered tool {}", descriptor.id());
        self.tools.push(descriptor);
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

impl ToolRegistry {
    /// Start building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Registry of every Exa tool, in listing order.
    ///
    /// This is the single source of truth for the tools the server knows.
    pub fn exa(client: Arc<ExaClient>) -> Result<Self, ToolError> {
        Ok(Self::builder()
            .register(ToolDescriptor::from_handler(WebSearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(ResearchPaperSearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(CompanyResearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(CrawlingTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(CompetitorFinderTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(LinkedinSearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(WikipediaSearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(GithubSearchTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(DeepResearcherStartTool::new(client.clone())))?
            .register(ToolDescriptor::from_handler(DeepResearcherCheckTool::new(client)))?
            .build())
    }

    /// All descriptors in registration order.
    pub fn all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.id() == id)
    }

    /// All tool ids in registration order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.tools.iter().map(ToolDescriptor::id).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExaConfig;
    use crate::domains::tools::testing::{AlphaTool, BetaTool, EchoTool, fake_registry};

    fn exa_registry() -> ToolRegistry {
        let client = ExaClient::new(&ExaConfig::default(), None).unwrap();
        ToolRegistry::exa(Arc::new(client)).unwrap()
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let registry = fake_registry();
        assert_eq!(registry.ids(), vec!["alpha", "beta", "search", "gamma"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let (echo, _) = EchoTool::new();
        let (echo_again, _) = EchoTool::new();
        let err = ToolRegistry::builder()
            .register(ToolDescriptor::from_handler(echo))
            .unwrap()
            .register(ToolDescriptor::from_handler(AlphaTool))
            .unwrap()
            .register(ToolDescriptor::from_handler(echo_again))
            .unwrap_err();

        assert!(matches!(err, ToolError::DuplicateId(ref id) if id == "echo"));
    }

    #[test]
    fn test_get() {
        let registry = ToolRegistry::builder()
            .register(ToolDescriptor::from_handler(BetaTool))
            .unwrap()
            .build();
        assert_eq!(registry.get("beta").map(|d| d.id()), Some("beta"));
        assert!(registry.get("alpha").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn test_exa_registry_tool_names() {
        let registry = exa_registry();
        assert_eq!(
            registry.ids(),
            vec![
                "web_search_exa",
                "research_paper_search_exa",
                "company_research_exa",
                "crawling_exa",
                "competitor_finder_exa",
                "linkedin_search_exa",
                "wikipedia_search_exa",
                "github_search_exa",
                "deep_researcher_start",
                "deep_researcher_check",
            ]
        );
    }

    #[test]
    fn test_exa_registry_defaults() {
        let registry = exa_registry();
        let disabled: Vec<_> = registry
            .all()
            .iter()
            .filter(|d| !d.enabled_by_default())
            .map(|d| d.id())
            .collect();
        assert_eq!(disabled, vec!["deep_researcher_start", "deep_researcher_check"]);
    }
}
