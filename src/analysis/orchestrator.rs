//! Cache-checked "analyze posts" operation.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::aligner::align_suggestions;
use super::prompt::suggestion_prompt;
use crate::cache::{CacheKey, ResponseCache};
use crate::generation::TextGenerator;
use crate::types::{AnalysisResult, Post};
use crate::{Error, ErrorContext, Result};

/// How many leading posts are sent to the generation service by default.
pub const DEFAULT_MAX_CONSIDERED: usize = 2;

pub const NO_POSTS_NARRATIVE: &str = "⚠️ No posts to analyze";
pub const UNAVAILABLE_NARRATIVE: &str = "⚠️ Service temporarily unavailable. Try again later.";
pub const SUGGESTIONS_HEADER: &str = "🛒 Suggested Products:\n";

/// Composes the response cache, the generation service and the aligner.
///
/// [`AnalysisOrchestrator::analyze`] never fails: generation errors yield a
/// degraded result with empty suggestions, which is not cached.
pub struct AnalysisOrchestrator {
    cache: Arc<ResponseCache>,
    generator: Arc<dyn TextGenerator>,
    max_considered: usize,
    call_timeout: Option<Duration>,
}

impl AnalysisOrchestrator {
    pub fn new(cache: Arc<ResponseCache>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            cache,
            generator,
            max_considered: DEFAULT_MAX_CONSIDERED,
            call_timeout: None,
        }
    }

    /// Bound the considered prefix. Values below 1 are raised to 1.
    pub fn with_max_considered(mut self, n: usize) -> Self {
        self.max_considered = n.max(1);
        self
    }

    /// Bound the generation call. A timed-out call degrades and leaves the cache untouched.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn max_considered(&self) -> usize {
        self.max_considered
    }

    /// The prefix of `posts` that would be sent to the generation service.
    pub fn considered<'a>(&self, posts: &'a [Post]) -> &'a [Post] {
        &posts[..posts.len().min(self.max_considered)]
    }

    pub async fn analyze(&self, posts: &[Post]) -> AnalysisResult {
        if posts.is_empty() {
            return AnalysisResult::degraded(NO_POSTS_NARRATIVE);
        }

        let considered = self.considered(posts);
        let key = CacheKey::from_posts(considered);

        if let Some(cached) = self.cache.lookup(&key) {
            debug!(key = %key, "analysis cache hit");
            return cached;
        }
        debug!(key = %key, posts = considered.len(), "analysis cache miss");

        let prompt = suggestion_prompt(considered);
        let raw = match self.call_generator(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "analysis unavailable, returning degraded result"
                );
                return AnalysisResult::degraded(UNAVAILABLE_NARRATIVE);
            }
        };

        let suggestions = align_suggestions(&raw, considered);
        let result = AnalysisResult::new(format!("{}{}", SUGGESTIONS_HEADER, raw), suggestions);
        self.cache.store(key, result.clone());
        info!(suggestions = result.suggestions.len(), "analysis complete");
        result
    }

    async fn call_generator(&self, prompt: &str) -> Result<String> {
        let raw = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.generate(prompt))
                .await
                .map_err(|_| {
                    Error::runtime_with_context(
                        "generation call timed out",
                        ErrorContext::new()
                            .with_details(format!("{:?}", limit))
                            .with_source("analysis"),
                    )
                })??,
            None => self.generator.generate(prompt).await?,
        };
        if raw.trim().is_empty() {
            return Err(Error::unextractable("generation service returned empty text"));
        }
        Ok(raw)
    }
}
