//! Common utilities shared across the Exa tools.
//!
//! Parameter defaults, result formatting and the shared search flow.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::{info, warn};

use crate::domains::exa::types::{SearchRequest, SearchResponse, SearchResult};
use crate::domains::exa::{DEFAULT_NUM_RESULTS, ExaClient};

/// Upper bound Exa accepts for `numResults`.
const MAX_NUM_RESULTS: usize = 100;

/// Longest text excerpt shown per result in the summary block.
const SNIPPET_CHARS: usize = 300;

/// Default number of results.
pub fn default_num_results() -> usize {
    DEFAULT_NUM_RESULTS
}

/// Clamp the number of results to the range Exa accepts (1-100).
pub fn validate_num_results(num_results: usize) -> usize {
    num_results.clamp(1, MAX_NUM_RESULTS)
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with a summary, the JSON payload as text, and the
/// same payload as structured content.
pub fn structured_result<T: Serialize>(summary: String, data: T) -> CallToolResult {
    let value = match serde_json::to_value(&data) {
        Ok(value) => value,
        Err(e) => return error_result(&format!("Failed to serialize result: {}", e)),
    };
    let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());

    let mut result = CallToolResult::success(vec![Content::text(summary), Content::text(pretty)]);
    result.structured_content = Some(value);
    result
}

/// Render search hits as a short human-readable list.
pub fn summarize_results(heading: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("{}: no results", heading);
    }

    let mut out = format!("{} ({} result(s)):", heading, results.len());
    for (i, r) in results.iter().enumerate() {
        let title = r.title.as_deref().unwrap_or("(untitled)");
        out.push_str(&format!("\n{}. {} - {}", i + 1, title, r.url));
        if let Some(date) = &r.published_date {
            out.push_str(&format!(" [{}]", date));
        }
        if let Some(text) = &r.text {
            out.push_str(&format!("\n   {}", snippet(text)));
        }
    }
    out
}

/// Whitespace-collapsed prefix of `text`, at most `SNIPPET_CHARS` characters.
fn snippet(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", cut)
}

/// Run a search and turn the response into a tool result.
///
/// Upstream failures become error results; the server keeps running.
pub async fn run_search(client: &ExaClient, heading: &str, request: SearchRequest) -> CallToolResult {
    info!("{} for: {}", heading, request.query);

    match client.search(&request).await {
        Ok(response) => search_result(heading, response),
        Err(e) => error_result(&format!("{} failed: {}", heading, e)),
    }
}

/// Turn a search/contents response into a tool result.
pub fn search_result(heading: &str, response: SearchResponse) -> CallToolResult {
    let summary = summarize_results(heading, &response.results);
    structured_result(summary, response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: Option<&str>, url: &str, text: Option<&str>) -> SearchResult {
        SearchResult {
            id: None,
            url: url.to_string(),
            title: title.map(str::to_string),
            published_date: None,
            author: None,
            score: None,
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_num_results() {
        assert_eq!(validate_num_results(5), 5);
        assert_eq!(validate_num_results(0), 1);
        assert_eq!(validate_num_results(500), 100);
    }

    #[test]
    fn test_summarize_results() {
        let results = vec![
            hit(Some("Tokio"), "https://tokio.rs", Some("An  async\nruntime")),
            hit(None, "https://example.com", None),
        ];
        let summary = summarize_results("Web search", &results);

        assert!(summary.starts_with("Web search (2 result(s)):"));
        assert!(summary.contains("1. Tokio - https://tokio.rs"));
        assert!(summary.contains("   An async runtime"));
        assert!(summary.contains("2. (untitled) - https://example.com"));
    }

    #[test]
    fn test_summarize_no_results() {
        assert_eq!(summarize_results("Web search", &[]), "Web search: no results");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "a".repeat(SNIPPET_CHARS + 10);
        let cut = snippet(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SNIPPET_CHARS + 3);
    }

    #[test]
    fn test_structured_result_carries_payload() {
        let result = structured_result("done".to_string(), serde_json::json!({ "a": 1 }));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 2);
        assert_eq!(result.structured_content, Some(serde_json::json!({ "a": 1 })));
    }
}
