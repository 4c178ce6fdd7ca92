//! format_answer tool implementation.
//!
//! Converts raw answer text to an HTML fragment. No storage or network access.

use intelliask_core::format_answer;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the format_answer tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormatAnswerParams {
    /// Raw answer text using `**bold**` and `*` bullets.
    pub text: String,
}

/// Implementation of the format_answer tool.
pub async fn format_answer_impl(params: FormatAnswerParams) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(format_answer(&params.text))]))
}
