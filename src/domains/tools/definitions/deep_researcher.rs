//! Exa deep research tools.
//!
//! Research runs asynchronously on Exa's side: `deep_researcher_start`
//! creates a task and returns its id, `deep_researcher_check` polls it.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
use crate::domains::exa::ExaClient;
use crate::domains::exa::types::{ResearchModel, ResearchStatus, ResearchTaskRequest};
use crate::domains::tools::ToolError;
use crate::domains::tools::handlers::{ToolHandler, require_non_blank};

// ============================================================================
// Start
// ============================================================================

/// Parameters for starting a research task.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeepResearcherStartParams {
    #[schemars(description = "Detailed research question or instructions")]
    pub instructions: String,

    #[schemars(
        description = "'exa-research' (faster, default) or 'exa-research-pro' (more thorough)"
    )]
    #[serde(default)]
    pub model: ResearchModel,
}

/// Structured output of `deep_researcher_start`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ResearchStarted {
    pub task_id: String,
    pub model: ResearchModel,
}

/// Start a deep research task.
pub struct DeepResearcherStartTool {
    client: Arc<ExaClient>,
}

impl DeepResearcherStartTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for DeepResearcherStartTool {
    type Params = DeepResearcherStartParams;

    const ID: &'static str = "deep_researcher_start";
    const NAME: &'static str = "Deep Researcher Start";
    const DESCRIPTION: &'static str = "Start an AI research task that searches, reads and synthesizes many sources into a report. Returns a task id; poll it with deep_researcher_check until the status is completed.";
    const ENABLED_BY_DEFAULT: bool = false;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("instructions", &params.instructions)
    }

    #[instrument(skip_all, fields(model = ?params.model))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let request = ResearchTaskRequest::new(params.instructions.trim(), params.model);

        match self.client.start_research(&request).await {
            Ok(created) => {
                info!("Research task {} started", created.id);
                let summary = format!(
                    "Research task started: {}. Call deep_researcher_check with this task id to follow progress.",
                    created.id
                );
                structured_result(
                    summary,
                    ResearchStarted {
                        task_id: created.id,
                        model: params.model,
                    },
                )
            }
            Err(e) => error_result(&format!("Failed to start research task: {}", e)),
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// Parameters for checking a research task.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeepResearcherCheckParams {
    #[schemars(description = "Task id returned by deep_researcher_start")]
    pub task_id: String,
}

/// Check the status of a research task and return its report when done.
pub struct DeepResearcherCheckTool {
    client: Arc<ExaClient>,
}

impl DeepResearcherCheckTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for DeepResearcherCheckTool {
    type Params = DeepResearcherCheckParams;

    const ID: &'static str = "deep_researcher_check";
    const NAME: &'static str = "Deep Researcher Check";
    const DESCRIPTION: &'static str = "Check a research task started with deep_researcher_start. Returns the status, and the report once the task has completed.";
    const ENABLED_BY_DEFAULT: bool = false;

    fn check(params: &Self::Params) -> Result<(), ToolError> {
        require_non_blank("task_id", &params.task_id)?;

        let id = params.task_id.trim();
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ToolError::invalid_arguments(format!(
                "'task_id' may only contain letters, digits, '-' and '_' (got '{}')",
                id
            )));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(task_id = %params.task_id))]
    async fn invoke(&self, params: Self::Params) -> CallToolResult {
        let task_id = params.task_id.trim();

        let task = match self.client.research_task(task_id).await {
            Ok(task) => task,
            Err(e) => return error_result(&format!("Failed to check research task {}: {}", task_id, e)),
        };

        let summary = match task.status {
            ResearchStatus::Completed => format!("Research task {} completed.", task.id),
            ResearchStatus::Failed | ResearchStatus::Canceled => {
                return error_result(&format!(
                    "Research task {} ended with status {:?}",
                    task.id, task.status
                ));
            }
            status => format!(
                "Research task {} is {:?}. Check again in a few seconds.",
                task.id, status
            ),
        };

        structured_result(summary, task)
    }
}
