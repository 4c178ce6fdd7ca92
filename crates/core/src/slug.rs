//! Question ↔ slug codec.
//!
//! A slug is the lower-cased question with everything but ASCII word
//! characters, whitespace and hyphens stripped, and whitespace runs turned
//! into single hyphens. The mapping is lossy: distinct questions can share a
//! slug, and decoding only approximates the original text.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Derive the slug for a question. Pure and total.
pub fn encode(question: &str) -> String {
    let lowered = question.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    WHITESPACE_RE.replace_all(kept.trim(), "-").into_owned()
}

/// Approximate the question behind a slug, for display only.
///
/// Percent-escapes are decoded first (slugs arrive from URL paths), then
/// hyphens become spaces. Undecodable escapes are left as they are.
pub fn decode(slug: &str) -> String {
    let decoded = urlencoding::decode(slug)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| slug.to_string());
    decoded.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_basic() {
        assert_eq!(encode("What is Rust"), "what-is-rust");
    }

    #[test]
    fn test_encode_deterministic() {
        let q = "Come funziona l'ownership in Rust?";
        assert_eq!(encode(q), encode(q));
    }

    #[test]
    fn test_encode_idempotent_on_word_input() {
        for q in ["hello world", "what is rust", "snake_case and-hyphens", "abc123"] {
            assert_eq!(encode(&encode(q)), encode(q), "not idempotent for {q:?}");
        }
    }

    #[test]
    fn test_encode_collisions_are_accepted() {
        // Lossy on purpose: punctuation and case do not distinguish questions.
        assert_eq!(encode("Hello, World!"), "hello-world");
        assert_eq!(encode("hello world"), "hello-world");
        assert_eq!(encode("Hello, World!"), encode("hello world"));
    }

    #[test]
    fn test_encode_collapses_whitespace() {
        assert_eq!(encode("  what \t is\n\nrust  "), "what-is-rust");
    }

    #[test]
    fn test_encode_strips_non_ascii_and_punctuation() {
        assert_eq!(encode("Perché il cielo è blu?"), "perch-il-cielo-blu");
        assert_eq!(encode("C++ vs. C#"), "c-vs-c");
    }

    #[test]
    fn test_encode_keeps_hyphens_and_underscores() {
        assert_eq!(encode("is tokio-rusqlite snake_case"), "is-tokio-rusqlite-snake_case");
        assert_eq!(encode("a - b"), "a---b");
    }

    #[test]
    fn test_encode_only_punctuation() {
        assert_eq!(encode("?!..."), "");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_decode_replaces_hyphens() {
        assert_eq!(decode("what-is-rust"), "what is rust");
    }

    #[test]
    fn test_decode_percent_escapes() {
        assert_eq!(decode("caf%C3%A9-au-lait"), "café au lait");
        assert_eq!(decode("a%2Db"), "a b");
    }

    #[test]
    fn test_decode_invalid_escape_kept() {
        assert_eq!(decode("bad-%FF-escape"), "bad %FF escape");
    }

    #[test]
    fn test_decode_is_lossy() {
        let q = "Hello, World!";
        assert_ne!(decode(&encode(q)), q);
        assert_eq!(decode(&encode(q)), "hello world");
    }
}
