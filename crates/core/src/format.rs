//! Answer text to HTML fragment conversion.
//!
//! Generated answers use a small markdown-ish dialect: `**bold**` spans and
//! lines starting with a `*` bullet. Everything else is plain text. Each line
//! is HTML-escaped before markup is applied, so the output never carries
//! markup that did not come from these two rules.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*\s+").expect("valid bullet regex"));

enum Line {
    Item(String),
    Text(String),
}

/// Convert raw answer text into an HTML fragment.
///
/// Without bullets every line becomes a `<p>`. With at least one bullet the
/// whole answer becomes a single `<ul>`, bullets as `<li>` and the remaining
/// lines as `<p>` in between. Empty input yields an empty string.
pub fn format_answer(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let lines: Vec<Line> = raw.lines().map(format_line).collect();
    let has_items = lines.iter().any(|line| matches!(line, Line::Item(_)));

    let body: String = lines
        .iter()
        .map(|line| match line {
            Line::Item(content) => format!("<li>{content}</li>"),
            Line::Text(content) => format!("<p>{content}</p>"),
        })
        .collect();

    if has_items { format!("<ul>{body}</ul>") } else { body }
}

fn format_line(line: &str) -> Line {
    let escaped = escape_html(line);
    let marked = BOLD_RE.replace_all(&escaped, "<strong>${1}</strong>");

    match BULLET_RE.find(&marked) {
        Some(marker) => Line::Item(marked[marker.end()..].to_string()),
        None => Line::Text(marked.into_owned()),
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
