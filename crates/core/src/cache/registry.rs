//! Append-only, slug-deduplicated ledger of submitted questions.
//!
//! The registry is persisted as one pretty-printed JSON array under
//! `questions.json` and rewritten whole on every new slug. Within a process
//! registrations are serialised; separate processes sharing the storage can
//! still interleave their read-modify-write and append duplicates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::storage::Storage;
use crate::{Error, slug};

/// Storage key of the registry snapshot.
pub const REGISTRY_KEY: &str = "questions.json";

/// A registered question and its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Question {
    /// Question text as first submitted under this slug.
    pub question: String,
    pub slug: String,
}

/// Ordered registry of every distinct slug ever submitted.
pub struct QuestionRegistry {
    storage: Arc<dyn Storage>,
    write_lock: Mutex<()>,
}

impl QuestionRegistry {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage, write_lock: Mutex::new(()) }
    }

    /// All registered questions in registration order.
    ///
    /// Empty when nothing has been persisted yet.
    pub async fn all(&self) -> Result<Vec<Question>, Error> {
        match self.storage.read(REGISTRY_KEY).await? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Register `question` and return its slug.
    ///
    /// The first question to produce a slug wins; later questions with the
    /// same slug leave the registry untouched but get the same slug back.
    pub async fn register(&self, question: &str) -> Result<String, Error> {
        let slug = slug::encode(question);

        let _guard = self.write_lock.lock().await;
        let mut questions = self.all().await?;

        if questions.iter().any(|q| q.slug == slug) {
            return Ok(slug);
        }

        questions.push(Question { question: question.to_string(), slug: slug.clone() });
        let json = serde_json::to_string_pretty(&questions)?;
        self.storage.write(REGISTRY_KEY, &json).await?;

        tracing::info!(slug = %slug, total = questions.len(), "registered question");
        Ok(slug)
    }
}
