//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    AskParams, FormatAnswerParams, QuestionPageParams, ask::ask_impl, format_answer::format_answer_impl,
    list_questions::list_questions_impl, question_page::question_page_impl, sitemap::sitemap_impl,
};
use intelliask_core::QuestionService;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for intelliask.
#[derive(Clone)]
pub struct IntelliAskServer {
    service: Arc<QuestionService>,
    site_url: Arc<str>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl IntelliAskServer {
    /// Create a new server handler.
    pub fn new(service: Arc<QuestionService>, site_url: impl Into<Arc<str>>) -> Self {
        Self { service, site_url: site_url.into(), tool_router: Self::tool_router() }
    }

    /// Answer a question, using the cached answer when one exists.
    #[tool(description = "Answer a free-text question. Returns the answer, its slug, and whether it was served from cache.")]
    async fn ask(&self, params: Parameters<AskParams>) -> Result<CallToolResult, McpError> {
        ask_impl(&self.service, params.0).await
    }

    /// Render the page for a question slug.
    #[tool(
        description = "Look up a question by slug and render its HTML page. Generates and caches the answer if missing."
    )]
    async fn question_page(&self, params: Parameters<QuestionPageParams>) -> Result<CallToolResult, McpError> {
        question_page_impl(&self.service, params.0).await
    }

    /// List every registered question.
    #[tool(description = "List all registered questions and their slugs in registration order.")]
    async fn list_questions(&self) -> Result<CallToolResult, McpError> {
        list_questions_impl(&self.service).await
    }

    /// Render the XML sitemap.
    #[tool(description = "Render the XML sitemap covering the site root and every registered question page.")]
    async fn sitemap(&self) -> Result<CallToolResult, McpError> {
        sitemap_impl(&self.service, &self.site_url).await
    }

    /// Convert raw answer text to HTML.
    #[tool(description = "Convert raw answer text (**bold**, * bullets) to an HTML fragment. No network requests are made.")]
    async fn format_answer(&self, params: Parameters<FormatAnswerParams>) -> Result<CallToolResult, McpError> {
        format_answer_impl(params.0).await
    }
}

impl ServerHandler for IntelliAskServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "intelliask".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Answers questions via Gemini and caches each answer under a slug derived from the question.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
