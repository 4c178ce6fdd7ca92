//! In-memory storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Storage, validate_key};
use crate::Error;

/// Keeps every value in a map; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn exists(&self, key: &str) -> Result<bool, Error> {
        validate_key(key)?;
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Option<String>, Error> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        validate_key(key)?;
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
