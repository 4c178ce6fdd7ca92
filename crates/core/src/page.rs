//! Standalone HTML page for a single question.

use crate::format::{escape_html, format_answer};

const DESCRIPTION_CHARS: usize = 150;

const PAGE_STYLE: &str = "body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; \
margin: 0; padding: 0; background-color: #f9f9f9; color: #333; }
.container { max-width: 800px; margin: 50px auto; padding: 20px; background: #fff; border-radius: 8px; \
box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
h1 { color: #0077cc; font-size: 2rem; margin-bottom: 20px; }
p, ul { font-size: 1.2rem; margin-bottom: 15px; }
li { margin-bottom: 10px; }
strong { color: #0077cc; }
.disclaimer { font-size: 11px; margin-top: 20px; margin-bottom: 10px; }";

/// Render the crawlable page for a question and its raw answer.
///
/// The question is display text (usually a decoded slug); the description
/// meta tag carries the first characters of the raw answer.
pub fn render_question_page(question: &str, answer: &str) -> String {
    let title = escape_html(question);
    let description: String = answer.chars().take(DESCRIPTION_CHARS).collect();
    let description = escape_html(&description);
    let body = format_answer(answer);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <meta name="description" content="{description}" />
  <style>
{PAGE_STYLE}
  </style>
</head>
<body>
  <div class="container">
    <h1>{title}</h1>
    <div class="answer">{body}</div>
    <p class="disclaimer">*Answers may be inaccurate or out of date.</p>
  </div>
</body>
</html>
"#
    )
}
