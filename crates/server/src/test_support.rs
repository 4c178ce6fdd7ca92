//! Shared fixtures for tool tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use intelliask_core::{AnswerGenerator, Error, MemoryStorage, QuestionService, ServiceOptions};
use rmcp::model::CallToolResult;

/// Generator returning a fixed answer (or failing) and counting calls.
pub struct CannedGenerator {
    answer: Option<&'static str>,
    calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn answering(answer: &'static str) -> Arc<Self> {
        Arc::new(Self { answer: Some(answer), calls: AtomicUsize::new(0) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { answer: None, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .map(str::to_string)
            .ok_or_else(|| Error::GatewayFailure("HTTP error 503: Service Unavailable".into()))
    }
}

pub fn service(generator: Arc<CannedGenerator>) -> QuestionService {
    QuestionService::new(Arc::new(MemoryStorage::new()), generator, ServiceOptions::default())
}

/// Text of the first content item of a tool result.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}
