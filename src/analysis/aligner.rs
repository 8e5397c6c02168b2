//! Positional alignment of bullet output to the considered posts.

use crate::types::{Post, Suggestion};

/// Delimiter the prompt asks the model to put before each suggestion.
pub const BULLET: char = '•';

/// Product text used when no bullet exists for a post's position.
pub const NO_SUGGESTION: &str = "No suggestion found";

/// Split raw model output on [`BULLET`], trimming and dropping blank segments.
///
/// Text before the first bullet counts as a segment if it is not blank.
pub fn parse_bullets(raw: &str) -> Vec<String> {
    raw.split(BULLET)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Pair parsed segments with `posts` by index.
///
/// Always returns exactly `posts.len()` suggestions: missing positions get
/// [`NO_SUGGESTION`], surplus segments are dropped. Segments are never
/// reordered, deduplicated or checked for relevance.
pub fn align_suggestions(raw: &str, posts: &[Post]) -> Vec<Suggestion> {
    let segments = parse_bullets(raw);
    if segments.len() < posts.len() {
        tracing::debug!(
            parsed = segments.len(),
            expected = posts.len(),
            "fewer suggestions than posts, filling with placeholders"
        );
    }
    let mut segments = segments.into_iter();
    posts
        .iter()
        .map(|post| {
            let product = segments
                .next()
                .unwrap_or_else(|| NO_SUGGESTION.to_string());
            Suggestion::new(product, post.upvotes, post.title.clone())
        })
        .collect()
}
