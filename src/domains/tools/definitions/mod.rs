//! Tool definitions module.
//!
//! One file per tool. The two deep research tools share a file, and the
//! site-restricted searches share one generic tool. Every tool
//! implements [`ToolHandler`](super::ToolHandler) on top of the shared
//! [`ExaClient`](crate::domains::exa::ExaClient).

pub mod common;
pub mod company_research;
pub mod competitor_finder;
pub mod crawling;
pub mod deep_researcher;
pub mod research_paper;
pub mod site_search;
pub mod web_search;

pub use company_research::CompanyResearchTool;
pub use competitor_finder::CompetitorFinderTool;
pub use crawling::CrawlingTool;
pub use deep_researcher::{DeepResearcherCheckTool, DeepResearcherStartTool};
pub use research_paper::ResearchPaperSearchTool;
pub use site_search::{GithubSearchTool, LinkedinSearchTool, SiteSearchTool, WikipediaSearchTool};
pub use web_search::WebSearchTool;
