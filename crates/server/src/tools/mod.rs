//! MCP tool implementations.
//!
//! This module contains all tools exposed by the intelliask server.

pub mod ask;
pub mod format_answer;
pub mod list_questions;
pub mod question_page;
pub mod sitemap;

pub use ask::AskParams;
pub use format_answer::FormatAnswerParams;
pub use question_page::QuestionPageParams;
