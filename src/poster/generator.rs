//! "Produce poster document" operation.

use std::sync::Arc;
use tracing::{info, warn};

use super::fallback::compose_fallback;
use super::prompt::poster_prompt;
use super::validator::HtmlValidator;
use crate::generation::TextGenerator;
use crate::types::{PosterDocument, Suggestion};

pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// Generates a poster through the generation service, falling back to
/// [`compose_fallback`] on any failure.
///
/// Per call: `Requesting -> Validating -> Done(generated)`, or straight to
/// `Done(fallback)` when the call fails or validation rejects the output.
/// There are no retries and nothing shared is mutated.
pub struct PosterGenerator {
    generator: Arc<dyn TextGenerator>,
    validator: HtmlValidator,
    max_suggestions: usize,
    excerpt_chars: usize,
}

impl PosterGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            validator: HtmlValidator::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }

    pub fn with_max_suggestions(mut self, n: usize) -> Self {
        self.max_suggestions = n;
        self
    }

    pub fn with_excerpt_chars(mut self, n: usize) -> Self {
        self.excerpt_chars = n;
        self
    }

    pub async fn generate(
        &self,
        category: &str,
        analysis: &str,
        suggestions: &[Suggestion],
    ) -> PosterDocument {
        let prompt = poster_prompt(
            category,
            analysis,
            suggestions,
            self.max_suggestions,
            self.excerpt_chars,
        );

        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(category, error = %e, "poster generation failed, using fallback");
                return PosterDocument::fallback(compose_fallback(category, suggestions));
            }
        };

        let validation = self.validator.validate(&raw);
        if validation.is_valid() {
            info!(category, bytes = validation.sanitized.len(), "poster generated");
            return PosterDocument::generated(validation.sanitized);
        }

        warn!(
            category,
            reasons = %validation.reason_messages().join(", "),
            "generated poster rejected, using fallback"
        );
        PosterDocument::fallback(compose_fallback(category, suggestions))
    }
}
