//! ask tool implementation.
//!
//! Answers a free-text question, serving the cached answer when its slug
//! has been answered before.

use intelliask_core::{Answered, QuestionService};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the ask tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AskParams {
    /// The question to answer.
    pub question: String,
}

/// Implementation of the ask tool.
pub async fn ask_impl(service: &QuestionService, params: AskParams) -> Result<CallToolResult, McpError> {
    let output: Answered = service.submit(&params.question).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
