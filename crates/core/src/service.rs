//! Question service: generate-or-fetch over the slug-keyed answer cache.
//!
//! # Invariants
//! - Blank questions are rejected before anything is registered or stored.
//! - A cache hit never calls the generator.
//! - Only successful generations are written to the cache.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::cache::{AnswerStore, Question, QuestionRegistry};
use crate::config::{AppConfig, MalformedResponsePolicy};
use crate::generator::{AnswerGenerator, FALLBACK_ANSWER};
use crate::storage::Storage;
use crate::{Error, slug};

/// Tunables taken from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub max_question_chars: usize,
    pub malformed_response: MalformedResponsePolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { max_question_chars: 500, malformed_response: MalformedResponsePolicy::Fail }
    }
}

impl ServiceOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self { max_question_chars: config.max_question_chars, malformed_response: config.malformed_response }
    }
}

/// Result of submitting a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Answered {
    pub answer: String,
    pub slug: String,
    /// Whether the answer came from the cache.
    pub cache_hit: bool,
}

/// Result of looking a question up by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QuestionPage {
    pub slug: String,
    /// Display text decoded from the slug.
    pub question: String,
    pub answer: String,
    pub cache_hit: bool,
}

/// Sole owner of the registry and answer cache.
pub struct QuestionService {
    registry: QuestionRegistry,
    answers: AnswerStore,
    generator: Arc<dyn AnswerGenerator>,
    options: ServiceOptions,
}

impl QuestionService {
    pub fn new(storage: Arc<dyn Storage>, generator: Arc<dyn AnswerGenerator>, options: ServiceOptions) -> Self {
        Self {
            registry: QuestionRegistry::new(Arc::clone(&storage)),
            answers: AnswerStore::new(storage),
            generator,
            options,
        }
    }

    /// Answer a free-text question, generating and caching on a miss.
    ///
    /// The question is trimmed and cut to `max_question_chars` before its
    /// slug is derived.
    pub async fn submit(&self, raw: &str) -> Result<Answered, Error> {
        let question = self.prepare_question(raw)?;
        let slug = self.registry.register(&question).await?;

        let (answer, cache_hit) = self.fetch_or_generate(&slug, &question).await?;
        Ok(Answered { answer, slug, cache_hit })
    }

    /// Answer the question behind `slug`.
    ///
    /// On a miss the prompt is the slug decoded back to text, since the
    /// original wording is not known here.
    pub async fn lookup(&self, slug: &str) -> Result<QuestionPage, Error> {
        if slug.trim().is_empty() {
            return Err(Error::MissingInput("slug cannot be empty".into()));
        }
        if slug.contains(['/', '\\']) || slug == "." || slug == ".." {
            return Err(Error::InvalidSlug(slug.to_string()));
        }

        let question = slug::decode(slug);
        let (answer, cache_hit) = self.fetch_or_generate(slug, &question).await?;
        Ok(QuestionPage { slug: slug.to_string(), question, answer, cache_hit })
    }

    /// Every registered question, in registration order.
    pub async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        self.registry.all().await
    }

    fn prepare_question(&self, raw: &str) -> Result<String, Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingInput("question cannot be empty".into()));
        }

        let question: String = trimmed.chars().take(self.options.max_question_chars).collect();
        if slug::encode(&question).is_empty() {
            return Err(Error::MissingInput("question has no letters or digits".into()));
        }
        Ok(question)
    }

    async fn fetch_or_generate(&self, slug: &str, prompt: &str) -> Result<(String, bool), Error> {
        if self.answers.has(slug).await?
            && let Some(answer) = self.answers.get(slug).await?
        {
            tracing::debug!(slug, cache_hit = true, "serving cached answer");
            return Ok((answer, true));
        }

        let start = Instant::now();
        let answer = self.generate(slug, prompt).await?;
        self.answers.put(slug, &answer).await?;

        tracing::info!(slug, cache_hit = false, elapsed_ms = start.elapsed().as_millis() as u64, "generated answer");
        Ok((answer, false))
    }

    async fn generate(&self, slug: &str, prompt: &str) -> Result<String, Error> {
        match self.generator.generate(prompt).await {
            Ok(answer) => Ok(answer),
            Err(Error::MalformedResponse(detail)) => match self.options.malformed_response {
                MalformedResponsePolicy::CacheFallback => {
                    tracing::warn!(slug, %detail, "caching fallback answer for malformed response");
                    Ok(FALLBACK_ANSWER.to_string())
                }
                MalformedResponsePolicy::Fail => Err(Error::GatewayFailure(format!("malformed response: {detail}"))),
            },
            Err(e) => {
                tracing::warn!(slug, error = %e, "answer generation failed");
                Err(e)
            }
        }
    }
}
