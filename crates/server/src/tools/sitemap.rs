//! sitemap tool implementation.
//!
//! Produces the XML sitemap for every registered question.

use intelliask_core::{QuestionService, sitemap};
use rmcp::{ErrorData as McpError, model::*};

/// Implementation of the sitemap tool.
pub async fn sitemap_impl(service: &QuestionService, site_url: &str) -> Result<CallToolResult, McpError> {
    let questions = service.list_questions().await?;
    let xml = sitemap::render(site_url, &questions);

    tracing::debug!(entries = questions.len(), "rendered sitemap");
    Ok(CallToolResult::success(vec![Content::text(xml)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedGenerator, result_text, service};

    #[tokio::test]
    async fn test_sitemap_lists_questions() {
        let service = service(CannedGenerator::answering("x"));
        service.submit("what is rust").await.unwrap();

        let result = sitemap_impl(&service, "https://intelliask.netlify.app").await.unwrap();
        let xml = result_text(&result);

        assert!(xml.contains("<loc>https://intelliask.netlify.app/</loc>"));
        assert!(xml.contains("<loc>https://intelliask.netlify.app/question/what-is-rust</loc>"));
    }
}
