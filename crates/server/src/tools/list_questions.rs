//! list_questions tool implementation.

use intelliask_core::{Question, QuestionService};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output structure for the list_questions tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListQuestionsOutput {
    /// Registered questions in registration order.
    pub questions: Vec<Question>,
}

/// Implementation of the list_questions tool.
pub async fn list_questions_impl(service: &QuestionService) -> Result<CallToolResult, McpError> {
    let output = ListQuestionsOutput { questions: service.list_questions().await? };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedGenerator, result_text, service};

    #[tokio::test]
    async fn test_lists_registered_questions() {
        let service = service(CannedGenerator::answering("x"));
        service.submit("What is Rust?").await.unwrap();
        service.submit("what is tokio").await.unwrap();

        let result = list_questions_impl(&service).await.unwrap();
        let output: ListQuestionsOutput = serde_json::from_str(&result_text(&result)).unwrap();

        assert_eq!(output.questions.len(), 2);
        assert_eq!(output.questions[0].question, "What is Rust?");
        assert_eq!(output.questions[1].slug, "what-is-tokio");
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let service = service(CannedGenerator::answering("x"));
        let result = list_questions_impl(&service).await.unwrap();
        let output: ListQuestionsOutput = serde_json::from_str(&result_text(&result)).unwrap();
        assert!(output.questions.is_empty());
    }
}
