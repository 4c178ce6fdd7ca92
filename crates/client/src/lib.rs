//! Client code for intelliask.
//!
//! This crate provides the Gemini `generateContent` client that backs the
//! question service's answer generation.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, GeminiError, GenerateContentRequest, GenerateContentResponse};
