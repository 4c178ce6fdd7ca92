//! Slug-keyed answer cache and the question registry.
//!
//! Both sit on the same [`Storage`](crate::storage::Storage): answers as one
//! value per slug, the registry as a single JSON snapshot.

pub mod answers;
pub mod registry;

pub use answers::AnswerStore;
pub use registry::{Question, QuestionRegistry};
