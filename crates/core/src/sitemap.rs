//! XML sitemap for all registered questions.

use std::fmt::Write;

use crate::cache::Question;

/// Render a sitemap listing the site root and one page per question.
///
/// `site_url` may carry a trailing slash; slugs are XML-escaped.
pub fn render(site_url: &str, questions: &[Question]) -> String {
    let base = site_url.trim_end_matches('/');

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    let _ = write!(
        xml,
        "  <url>\n    <loc>{}/</loc>\n    <changefreq>daily</changefreq>\n    <priority>1.0</priority>\n  </url>\n",
        escape_xml(base)
    );

    for question in questions {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}/question/{}</loc>\n    <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            escape_xml(base),
            escape_xml(&question.slug)
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(slug: &str) -> Question {
        Question { question: slug.replace('-', " "), slug: slug.to_string() }
    }

    #[test]
    fn test_empty_registry_lists_root_only() {
        let xml = render("https://intelliask.netlify.app", &[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://intelliask.netlify.app/</loc>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_questions_in_registry_order() {
        let xml = render("https://example.org/", &[question("what-is-rust"), question("why-tokio")]);
        assert_eq!(xml.matches("<url>").count(), 3);

        let first = xml.find("<loc>https://example.org/question/what-is-rust</loc>").unwrap();
        let second = xml.find("<loc>https://example.org/question/why-tokio</loc>").unwrap();
        assert!(first < second);
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_slugs_are_escaped() {
        let xml = render("https://example.org", &[question("a&b<c>")]);
        assert!(xml.contains("/question/a&amp;b&lt;c&gt;</loc>"));
    }
}
