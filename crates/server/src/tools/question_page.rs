//! question_page tool implementation.
//!
//! Renders the standalone page for a slug, generating the answer on a miss.

use intelliask_core::{QuestionService, page::render_question_page};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for the question_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionPageParams {
    /// Question slug, as found in `/question/{slug}` URLs.
    pub slug: String,
}

/// Output structure for the question_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionPageOutput {
    pub slug: String,
    /// Question text reconstructed from the slug.
    pub question: String,
    /// Raw answer text.
    pub answer: String,
    /// Complete HTML document for the question.
    pub html: String,
    pub cache_hit: bool,
}

/// Implementation of the question_page tool.
pub async fn question_page_impl(
    service: &QuestionService, params: QuestionPageParams,
) -> Result<CallToolResult, McpError> {
    let page = service.lookup(&params.slug).await?;
    let html = render_question_page(&page.question, &page.answer);

    let output = QuestionPageOutput {
        slug: page.slug,
        question: page.question,
        answer: page.answer,
        html,
        cache_hit: page.cache_hit,
    };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedGenerator, result_text, service};

    #[tokio::test]
    async fn test_page_for_submitted_question() {
        let generator = CannedGenerator::answering("* fast\n* safe");
        let service = service(generator.clone());
        service.submit("why rust").await.unwrap();

        let result = question_page_impl(&service, QuestionPageParams { slug: "why-rust".into() }).await.unwrap();
        let output: QuestionPageOutput = serde_json::from_str(&result_text(&result)).unwrap();

        assert_eq!(output.question, "why rust");
        assert!(output.cache_hit);
        assert!(output.html.contains("<title>why rust</title>"));
        assert!(output.html.contains("<ul><li>fast</li><li>safe</li></ul>"));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_page_invalid_slug() {
        let service = service(CannedGenerator::answering("x"));
        let err = question_page_impl(&service, QuestionPageParams { slug: "../secret".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_page_generation_failure() {
        let service = service(CannedGenerator::failing());
        let result = question_page_impl(&service, QuestionPageParams { slug: "unknown-question".into() }).await;
        assert!(result.is_err());
    }
}
