//! Request and response types for the Exa API.
//!
//! Only the fields the tools use are modelled; unknown response fields are
//! ignored by serde.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Search
// ============================================================================

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,

    #[serde(rename = "type")]
    pub search_type: SearchType,

    pub num_results: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_domains: Vec<String>,

    pub contents: ContentsOptions,
}

impl SearchRequest {
    /// Create an `auto` search for `query` returning up to `num_results` results.
    pub fn new(query: impl Into<String>, num_results: usize) -> Self {
        Self {
            query: query.into(),
            search_type: SearchType::Auto,
            num_results,
            category: None,
            include_domains: Vec::new(),
            exclude_domains: Vec::new(),
            contents: ContentsOptions::default(),
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn include_domain(mut self, domain: impl Into<String>) -> Self {
        self.include_domains.push(domain.into());
        self
    }

    pub fn exclude_domain(mut self, domain: impl Into<String>) -> Self {
        self.exclude_domains.push(domain.into());
        self
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn max_characters(mut self, max_characters: usize) -> Self {
        self.contents.text.max_characters = max_characters;
        self
    }

    pub fn livecrawl(mut self, livecrawl: Livecrawl) -> Self {
        self.contents.livecrawl = Some(livecrawl);
        self
    }
}

/// Search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Let Exa pick between neural and keyword search.
    #[default]
    Auto,
    Neural,
    Keyword,
}

/// Content category Exa can focus a search on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "research paper")]
    ResearchPaper,
}

/// Which page contents to return with each result.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsOptions {
    pub text: TextOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub livecrawl: Option<Livecrawl>,
}

/// Page text options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    pub max_characters: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_characters: super::DEFAULT_MAX_CHARACTERS,
        }
    }
}

/// Live crawl policy for page contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Livecrawl {
    Fallback,
    Preferred,
}

/// Response of `POST /search` and `POST /contents`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub resolved_search_type: Option<String>,

    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<String>,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ============================================================================
// Contents
// ============================================================================

/// Body of `POST /contents`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsRequest {
    pub ids: Vec<String>,

    #[serde(flatten)]
    pub contents: ContentsOptions,
}

impl ContentsRequest {
    /// Fetch the contents of a single URL, preferring a live crawl.
    pub fn url(url: impl Into<String>, max_characters: usize) -> Self {
        Self {
            ids: vec![url.into()],
            contents: ContentsOptions {
                text: TextOptions { max_characters },
                livecrawl: Some(Livecrawl::Preferred),
            },
        }
    }
}

// ============================================================================
// Research tasks
// ============================================================================

/// Research model used by a deep research task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ResearchModel {
    /// Faster, cheaper model.
    #[default]
    #[serde(rename = "exa-research")]
    ExaResearch,

    /// Slower, more thorough model.
    #[serde(rename = "exa-research-pro")]
    ExaResearchPro,
}

/// Body of `POST /research/v0/tasks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchTaskRequest {
    pub instructions: String,
    pub model: ResearchModel,
    pub output: ResearchOutput,
}

impl ResearchTaskRequest {
    pub fn new(instructions: impl Into<String>, model: ResearchModel) -> Self {
        Self {
            instructions: instructions.into(),
            model,
            output: ResearchOutput {
                infer_schema: false,
            },
        }
    }
}

/// Output options for a research task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOutput {
    pub infer_schema: bool,
}

/// Response of `POST /research/v0/tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchTaskCreated {
    pub id: String,
}

/// Lifecycle state of a research task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResearchStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Response of `GET /research/v0/tasks/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResearchTask {
    pub id: String,

    pub status: ResearchStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Task output; its shape depends on the instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_wire_format() {
        let request = SearchRequest::new("rust async", 3)
            .category(Category::ResearchPaper)
            .include_domain("arxiv.org");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "query": "rust async",
                "type": "auto",
                "numResults": 3,
                "category": "research paper",
                "includeDomains": ["arxiv.org"],
                "contents": { "text": { "maxCharacters": 3000 } }
            })
        );
    }

    #[test]
    fn test_contents_request_is_flattened() {
        let value = serde_json::to_value(ContentsRequest::url("https://exa.ai", 500)).unwrap();
        assert_eq!(value["ids"], json!(["https://exa.ai"]));
        assert_eq!(value["text"]["maxCharacters"], json!(500));
        assert_eq!(value["livecrawl"], json!("preferred"));
    }

    #[test]
    fn test_research_status_unknown_variant() {
        let task: ResearchTask =
            serde_json::from_value(json!({ "id": "t1", "status": "queued" })).unwrap();
        assert_eq!(task.status, ResearchStatus::Unknown);
    }

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [{ "url": "https://example.com", "extra": 1 }]
        }))
        .unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(response.results[0].title.is_none());
    }
}
