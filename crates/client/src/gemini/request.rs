//! Gemini `generateContent` request body.

use serde::Serialize;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    /// A single-turn request carrying `prompt` verbatim.
    pub fn from_prompt(prompt: &str) -> Self {
        Self { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt.to_string() }] }] }
    }
}
