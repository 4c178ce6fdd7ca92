//! Cached answers, one storage value per slug.

use std::sync::Arc;

use crate::Error;
use crate::storage::Storage;

/// Durable slug → raw answer text mapping.
///
/// There is no in-memory layer: every call goes to storage, so a restart
/// loses nothing.
#[derive(Clone)]
pub struct AnswerStore {
    storage: Arc<dyn Storage>,
}

impl AnswerStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Storage key holding the answer for `slug`.
    pub fn key_for(slug: &str) -> String {
        format!("answers/{slug}.txt")
    }

    pub async fn has(&self, slug: &str) -> Result<bool, Error> {
        self.storage.exists(&Self::key_for(slug)).await
    }

    /// The cached answer, or `None` when the slug was never answered.
    pub async fn get(&self, slug: &str) -> Result<Option<String>, Error> {
        self.storage.read(&Self::key_for(slug)).await
    }

    /// Persist `answer` for `slug`, replacing any earlier answer.
    pub async fn put(&self, slug: &str, answer: &str) -> Result<(), Error> {
        self.storage.write(&Self::key_for(slug), answer).await?;
        tracing::debug!(slug, bytes = answer.len(), "cached answer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FsStorage, MemoryStorage};

    #[tokio::test]
    async fn test_missing_answer() {
        let store = AnswerStore::new(Arc::new(MemoryStorage::new()));
        assert!(!store.has("what-is-rust").await.unwrap());
        assert!(store.get("what-is-rust").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = AnswerStore::new(Arc::new(MemoryStorage::new()));
        store.put("what-is-rust", "A systems language.").await.unwrap();

        assert!(store.has("what-is-rust").await.unwrap());
        assert_eq!(store.get("what-is-rust").await.unwrap().as_deref(), Some("A systems language."));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = AnswerStore::new(Arc::new(MemoryStorage::new()));
        store.put("q", "old").await.unwrap();
        store.put("q", "new").await.unwrap();
        assert_eq!(store.get("q").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_files_land_under_answers_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnswerStore::new(Arc::new(FsStorage::new(dir.path())));

        store.put("what-is-rust", "text").await.unwrap();

        let path = dir.path().join("answers").join("what-is-rust.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "text");
    }

    #[tokio::test]
    async fn test_traversal_slug_rejected() {
        let store = AnswerStore::new(Arc::new(MemoryStorage::new()));
        assert!(matches!(store.get("../../etc/passwd").await, Err(Error::InvalidKey(_))));
    }
}
