//! Durable key/value storage behind the answer cache and question registry.
//!
//! Keys are relative, `/`-separated strings such as `questions.json` or
//! `answers/what-is-rust.txt`. Adapters:
//!
//! - [`FsStorage`]: one file per key under a root directory
//! - [`SqliteStorage`]: a single key/value table via tokio-rusqlite
//! - [`MemoryStorage`]: process memory, for tests and throwaway runs

pub mod fs;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::Error;
use crate::config::{AppConfig, StorageBackend};

pub use fs::FsStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Byte-oriented storage addressable by string key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Whether a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool, Error>;

    /// The value stored under `key`, or `None` when there is none.
    async fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Reject keys that could address anything outside the storage root.
pub fn validate_key(key: &str) -> Result<(), Error> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.contains('\0')
        || key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid { Err(Error::InvalidKey(key.to_string())) } else { Ok(()) }
}

/// Open the storage backend selected by configuration.
pub async fn open_storage(config: &AppConfig) -> Result<Arc<dyn Storage>, Error> {
    let storage: Arc<dyn Storage> = match config.storage_backend {
        StorageBackend::Fs => Arc::new(FsStorage::new(&config.data_dir)),
        StorageBackend::Sqlite => Arc::new(SqliteStorage::open(&config.db_path).await?),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };

    tracing::info!(backend = ?config.storage_backend, "storage opened");
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_relative_paths() {
        assert!(validate_key("questions.json").is_ok());
        assert!(validate_key("answers/what-is-rust.txt").is_ok());
        assert!(validate_key("answers/%2E%2E.txt").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_escapes() {
        for key in ["", "/etc/passwd", "answers/../secret", "..", "./questions.json", "a//b", "a\\b", "answers/"] {
            assert!(matches!(validate_key(key), Err(Error::InvalidKey(_))), "accepted {key:?}");
        }
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = AppConfig { storage_backend: StorageBackend::Memory, ..Default::default() };
        let storage = open_storage(&config).await.unwrap();
        storage.write("k", "v").await.unwrap();
        assert_eq!(storage.read("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_open_fs_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { data_dir: dir.path().join("data"), ..Default::default() };
        let storage = open_storage(&config).await.unwrap();
        storage.write("answers/a.txt", "v").await.unwrap();
        assert!(dir.path().join("data/answers/a.txt").exists());
    }

    #[tokio::test]
    async fn test_open_sqlite_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            storage_backend: StorageBackend::Sqlite,
            db_path: dir.path().join("cache.sqlite"),
            ..Default::default()
        };
        let storage = open_storage(&config).await.unwrap();
        storage.write("questions.json", "[]").await.unwrap();
        assert!(storage.exists("questions.json").await.unwrap());
    }
}
