//! Analysis output types.

use serde::{Deserialize, Serialize};

/// A product suggestion paired with the post it was derived from.
///
/// `upvotes` and `post_title` are copied verbatim from the aligned post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub product: String,
    pub upvotes: u64,
    pub post_title: String,
}

impl Suggestion {
    pub fn new(product: impl Into<String>, upvotes: u64, post_title: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            upvotes,
            post_title: post_title.into(),
        }
    }
}

/// Result of analyzing a batch of posts.
///
/// An empty `suggestions` list means the analysis was unavailable (or there
/// was nothing to analyze); it never means "zero suggestions found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub narrative_text: String,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisResult {
    pub fn new(narrative_text: impl Into<String>, suggestions: Vec<Suggestion>) -> Self {
        Self {
            narrative_text: narrative_text.into(),
            suggestions,
        }
    }

    /// A result with no suggestions and an explanatory narrative.
    pub fn degraded(narrative_text: impl Into<String>) -> Self {
        Self::new(narrative_text, Vec::new())
    }

    pub fn is_available(&self) -> bool {
        !self.suggestions.is_empty()
    }
}
