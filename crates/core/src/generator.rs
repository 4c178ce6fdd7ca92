//! Seam between the question service and the text generation backend.

use async_trait::async_trait;

use crate::Error;

/// Answer cached when the backend replies without candidate text and the
/// `cache_fallback` policy is active.
pub const FALLBACK_ANSWER: &str = "No answer available.";

/// Produces answer text for a prompt.
///
/// Implementations report a reply without usable text as
/// [`Error::MalformedResponse`], a missing credential as [`Error::Config`] and
/// any other failure as [`Error::GatewayFailure`]. They must not truncate or
/// otherwise rewrite the prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}
