//! Prompt construction for poster documents.

use crate::types::Suggestion;

/// Build the poster prompt from the first `max_suggestions` suggestions and an
/// analysis excerpt of at most `excerpt_chars` characters.
pub fn poster_prompt(
    category: &str,
    analysis: &str,
    suggestions: &[Suggestion],
    max_suggestions: usize,
    excerpt_chars: usize,
) -> String {
    let products = suggestions
        .iter()
        .take(max_suggestions)
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{}. {} ({} upvotes, from \"{}\")",
                i + 1,
                s.product,
                s.upvotes,
                s.post_title
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a single complete HTML5 document for a mobile-responsive retail trend poster.\n\n\
         Category: {category}\n\n\
         Top products:\n{products}\n\n\
         Analysis excerpt:\n{excerpt}\n\n\
         Requirements:\n\
         - Start with <!DOCTYPE html> and end with </html>; include <head> and <body>.\n\
         - Include <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.\n\
         - Inline CSS only; no external scripts, fonts or images.\n\
         - Show each product with its upvote count.\n\
         - Return only the HTML document, with no explanation and no code fences.\n",
        category = category,
        products = products,
        excerpt = excerpt(analysis, excerpt_chars),
    )
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}…", trimmed[..cut].trim_end()),
        None => trimmed.to_string(),
    }
}
