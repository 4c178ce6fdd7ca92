//! intelliask MCP server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use intelliask_client::{GeminiClient, GeminiConfig};
use intelliask_core::{AppConfig, QuestionService, ServiceOptions, open_storage};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let storage = open_storage(&config).await?;
    let generator = GeminiClient::new(GeminiConfig::from_app_config(&config))?;
    let service = QuestionService::new(storage, Arc::new(generator), ServiceOptions::from_config(&config));

    tracing::info!(model = %config.gemini_model, "Starting intelliask MCP server on stdio transport");

    let handler = handler::IntelliAskServer::new(Arc::new(service), config.site_url.clone());
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
