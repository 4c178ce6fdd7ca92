//! Gemini `generateContent` response types.
//!
//! Every field is optional on the wire; only the first candidate's first
//! part is ever read.

use serde::Deserialize;

/// Raw response from `generateContent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// Why no text could be read, for diagnostics.
    pub fn missing_text_reason(&self) -> String {
        if let Some(reason) = self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref()) {
            return format!("prompt blocked: {reason}");
        }
        match self.candidates.first() {
            None => "no candidates".to_string(),
            Some(candidate) => match candidate.finish_reason.as_deref() {
                Some(reason) => format!("first candidate has no text (finish reason {reason})"),
                None => "first candidate has no text".to_string(),
            },
        }
    }
}

/// Best-effort extraction of `error.message` from an error body.
pub fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "candidates": [
            {
                "content": {
                    "parts": [{ "text": "**Rust** is a systems language." }, { "text": "ignored" }],
                    "role": "model"
                },
                "finishReason": "STOP",
                "index": 0
            },
            {
                "content": { "parts": [{ "text": "second candidate" }], "role": "model" }
            }
        ],
        "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 7 }
    }"#;

    #[test]
    fn test_first_candidate_first_part() {
        let response: GenerateContentResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(response.candidates.len(), 2);
        assert_eq!(response.first_text(), Some("**Rust** is a systems language."));
    }

    #[test]
    fn test_empty_object_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
        assert_eq!(response.missing_text_reason(), "no candidates");
    }

    #[test]
    fn test_candidate_without_parts() {
        let json = r#"{"candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_text().is_none());
        assert!(response.missing_text_reason().contains("SAFETY"));
    }

    #[test]
    fn test_empty_text_counts_as_missing() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_blocked_prompt_reason() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.missing_text_reason(), "prompt blocked: SAFETY");
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body).as_deref(), Some("API key not valid."));
        assert!(api_error_message("<html>bad gateway</html>").is_none());
        assert!(api_error_message(r#"{"error": {}}"#).is_none());
    }
}
