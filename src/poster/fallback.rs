//! Deterministic fallback poster.
//!
//! Pure string assembly: no network, no parsing of untrusted input, no failure
//! path. The output always passes [`super::HtmlValidator`].

use crate::types::Suggestion;
use std::fmt::Write as _;

/// Compose a minimal, self-contained poster for `category`.
///
/// One list entry per suggestion with its product text and upvote count.
pub fn compose_fallback(category: &str, suggestions: &[Suggestion]) -> String {
    let category = escape_html(category);
    let mut html = String::with_capacity(1024 + suggestions.len() * 160);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{} · Trending Products</title>", category);
    html.push_str("</head>\n");
    html.push_str(
        "<body style=\"margin:0;padding:16px;font-family:system-ui,sans-serif;background:#f9fafb;color:#111827\">\n",
    );
    html.push_str("<main style=\"max-width:640px;margin:0 auto\">\n");
    let _ = writeln!(
        html,
        "<h1 style=\"color:#3b82f6;text-align:center;font-size:1.6rem\">{} · Trending Products</h1>",
        category
    );

    if suggestions.is_empty() {
        html.push_str(
            "<p style=\"text-align:center;color:#6b7280\">No trending products right now. Check back soon.</p>\n",
        );
    } else {
        html.push_str("<ul style=\"list-style:none;padding:0;margin:0\">\n");
        for s in suggestions {
            let _ = writeln!(
                html,
                "<li style=\"display:flex;justify-content:space-between;gap:12px;padding:12px 16px;margin-bottom:8px;background:#ffffff;border:1px solid #e5e7eb;border-radius:8px\">\
                 <span>{}</span><strong style=\"white-space:nowrap\">{} upvotes</strong></li>",
                escape_html(&s.product),
                s.upvotes
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Escape markup characters and drop characters the HTML parser flags as errors.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#96;"),
            '\n' | '\t' => out.push(' '),
            c if c.is_control() || is_noncharacter(c) => {}
            c => out.push(c),
        }
    }
    out
}

fn is_noncharacter(c: char) -> bool {
    let n = c as u32;
    (0xFDD0..=0xFDEF).contains(&n) || (n & 0xFFFE) == 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::HtmlValidator;

    fn suggestions() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Wireless earbuds", 120, "best budget headphones"),
            Suggestion::new("Insulated parka", 80, "cheap winter coats"),
        ]
    }

    #[test]
    fn test_fallback_contains_category_and_products() {
        let html = compose_fallback("Electronics", &suggestions());
        assert!(html.contains("<title>Electronics · Trending Products</title>"));
        assert!(html.contains("Wireless earbuds"));
        assert!(html.contains("120 upvotes"));
        assert!(html.contains("Insulated parka"));
        assert!(html.contains("80 upvotes"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(
            compose_fallback("Pets", &suggestions()),
            compose_fallback("Pets", &suggestions())
        );
    }

    #[test]
    fn test_fallback_always_validates() {
        let validator = HtmlValidator::new();
        let hostile = vec![
            Suggestion::new("<script>alert('x')</script> & </body></html>", 0, "t"),
            Suggestion::new("", 1, ""),
            Suggestion::new("```html <!DOCTYPE html> ```", 2, "fence"),
            Suggestion::new("nul\u{0}bell\u{7}nonchar\u{FDD0}\u{FFFF} emoji 🛒", u64::MAX, "x"),
        ];
        let categories = [
            "Grocery",
            "",
            "Toys & <Baby>",
            "\"quoted\" 'single'",
            "line\nbreak\ttab",
            "<!DOCTYPE html>",
        ];
        for category in categories {
            for list in [&hostile[..], &suggestions()[..], &[][..]] {
                let html = compose_fallback(category, list);
                let result = validator.validate(&html);
                assert!(
                    result.is_valid(),
                    "category {:?}: {:?}",
                    category,
                    result.reasons
                );
                assert_eq!(result.sanitized, html.trim());
            }
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'`"), "a&lt;b&gt;&amp;&quot;c&#39;&#96;");
        assert_eq!(escape_html("x\u{0}y"), "xy");
    }
}
