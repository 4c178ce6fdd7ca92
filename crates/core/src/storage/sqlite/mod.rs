//! SQLite storage with pragma configuration.
//!
//! This module handles opening the SQLite database, applying required pragmas
//! for performance and concurrency (WAL mode), and creating the single `kv`
//! table every key lives in.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::{Connection, params, rusqlite};

use super::{Storage, validate_key};
use crate::Error;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
                       PRAGMA synchronous=NORMAL;
                       PRAGMA temp_store=MEMORY;
                       PRAGMA foreign_keys=ON;";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
                          key TEXT PRIMARY KEY,
                          value TEXT NOT NULL,
                          updated_at TEXT NOT NULL
                      );";

/// SQLite storage handle.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread.
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a database at the specified path.
    ///
    /// Creates the file (and its parent directory) if it doesn't exist,
    /// applies performance pragmas, and creates the `kv` table.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    /// Open an in-memory database for testing.
    ///
    /// Creates a temporary in-memory SQLite database with the same
    /// pragma configuration as file-based databases.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        tracing::debug!("sqlite storage ready");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn exists(&self, key: &str) -> Result<bool, Error> {
        validate_key(key)?;
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let found: bool =
                    conn.query_row("SELECT EXISTS(SELECT 1 FROM kv WHERE key = ?1)", params![key], |row| row.get(0))?;
                Ok(found)
            })
            .await
            .map_err(Error::from)
    }

    async fn read(&self, key: &str) -> Result<Option<String>, Error> {
        validate_key(key)?;
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0));

                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        validate_key(key)?;
        let key = key.to_string();
        let value = value.to_string();
        let updated_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![key, value, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = SqliteStorage::open_in_memory().await.unwrap();
        let version = db
            .conn
            .call(|conn| conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0)))
            .await
            .unwrap();
        assert!(!version.is_empty());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.sqlite");

        SqliteStorage::open(&path).await.unwrap();
        let db = SqliteStorage::open(&path).await.unwrap();

        let tables: i64 = db
            .conn
            .call(|conn| {
                conn.query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv'", [], |row| {
                    row.get(0)
                })
            })
            .await
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let db = SqliteStorage::open_in_memory().await.unwrap();
        assert!(db.read("answers/a.txt").await.unwrap().is_none());
        assert!(!db.exists("answers/a.txt").await.unwrap());

        db.write("answers/a.txt", "first").await.unwrap();
        db.write("answers/a.txt", "second").await.unwrap();

        assert!(db.exists("answers/a.txt").await.unwrap());
        assert_eq!(db.read("answers/a.txt").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/cache.sqlite");

        SqliteStorage::open(&path).await.unwrap().write("questions.json", "[]").await.unwrap();

        let reopened = SqliteStorage::open(&path).await.unwrap();
        assert_eq!(reopened.read("questions.json").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let db = SqliteStorage::open_in_memory().await.unwrap();
        assert!(matches!(db.read("/abs").await, Err(Error::InvalidKey(_))));
    }
}
