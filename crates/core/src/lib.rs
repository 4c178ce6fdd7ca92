//! Core types and shared functionality for intelliask.
//!
//! This crate provides:
//! - Slug codec for question identifiers
//! - Storage capability with filesystem, SQLite and in-memory adapters
//! - Answer cache and question registry built on that storage
//! - The question service that ties generation and caching together
//! - Answer formatting, question pages and sitemap rendering
//! - Unified error types and configuration

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod page;
pub mod service;
pub mod sitemap;
pub mod slug;
pub mod storage;

pub use cache::{AnswerStore, Question, QuestionRegistry};
pub use config::{AppConfig, ConfigError, MalformedResponsePolicy, StorageBackend};
pub use error::Error;
pub use format::format_answer;
pub use generator::{AnswerGenerator, FALLBACK_ANSWER};
pub use service::{Answered, QuestionPage, QuestionService, ServiceOptions};
pub use storage::{FsStorage, MemoryStorage, SqliteStorage, Storage, open_storage};
