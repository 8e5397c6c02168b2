//! Category-level composition: fetch posts, analyze, persist, publish a poster.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::analysis::AnalysisOrchestrator;
use crate::cache::{ResponseCache, SystemClock};
use crate::config::PipelineConfig;
use crate::generation::GeminiGenerator;
use crate::poster::{compose_fallback, PosterGenerator};
use crate::sources::{PostSource, RedditPostSource};
use crate::store::{chart_data, now_millis, PosterRecord, TrendRecord, TrendStore};
use crate::types::{AnalysisResult, PosterDocument, Suggestion};
use crate::Result;

/// Retail categories tracked by default.
pub const DEFAULT_CATEGORIES: [&str; 12] = [
    "Grocery",
    "Clothing and Apparel",
    "Health and Beauty",
    "Electronics",
    "Home and Furniture",
    "Household Essentials",
    "Toys and Baby",
    "Sports",
    "Stationery",
    "Pets",
    "Party Supplies",
    "Pharmacy",
];

/// Outcome of refreshing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: String,
    pub posts_fetched: usize,
    pub analysis: AnalysisResult,
    /// Suggestions fit for charting, as persisted.
    pub chart_data: Vec<Suggestion>,
}

pub struct TrendPipeline {
    source: Arc<dyn PostSource>,
    store: Arc<dyn TrendStore>,
    orchestrator: AnalysisOrchestrator,
    poster: PosterGenerator,
}

impl TrendPipeline {
    pub fn new(
        source: Arc<dyn PostSource>,
        store: Arc<dyn TrendStore>,
        orchestrator: AnalysisOrchestrator,
        poster: PosterGenerator,
    ) -> Self {
        Self {
            source,
            store,
            orchestrator,
            poster,
        }
    }

    /// Wire Reddit, Gemini and a fresh response cache from `config`.
    pub fn from_config(config: &PipelineConfig, store: Arc<dyn TrendStore>) -> Result<Self> {
        config.validate()?;
        let gen = &config.generation;

        let gemini = |max_output_tokens: u32| {
            let mut builder = GeminiGenerator::builder()
                .base_url(gen.base_url.clone())
                .model(gen.model.clone())
                .temperature(gen.temperature)
                .max_output_tokens(max_output_tokens)
                .timeout_secs(gen.timeout_secs);
            if let Some(ref key) = gen.api_key {
                builder = builder.api_key(key.clone());
            }
            builder.build()
        };
        let analysis_generator = gemini(gen.analysis_max_output_tokens)?;
        let poster_generator = gemini(gen.poster_max_output_tokens)?;

        let reddit = &config.reddit;
        let source = RedditPostSource::builder()
            .base_url(reddit.base_url.clone())
            .user_agent(reddit.user_agent.clone())
            .limit(reddit.limit)
            .time_window(reddit.time_window.clone())
            .timeout_secs(reddit.timeout_secs)
            .build()?;

        let cache = Arc::new(ResponseCache::new(
            config.analysis.cache_ttl(),
            Arc::new(SystemClock),
        ));
        let mut orchestrator = AnalysisOrchestrator::new(cache, Arc::new(analysis_generator))
            .with_max_considered(config.analysis.max_considered_posts);
        if let Some(limit) = config.analysis.call_timeout() {
            orchestrator = orchestrator.with_call_timeout(limit);
        }

        let poster = PosterGenerator::new(Arc::new(poster_generator))
            .with_max_suggestions(config.poster.max_suggestions)
            .with_excerpt_chars(config.poster.analysis_excerpt_chars);

        Ok(Self::new(Arc::new(source), store, orchestrator, poster))
    }

    pub fn store(&self) -> &Arc<dyn TrendStore> {
        &self.store
    }

    /// Operator-triggered cache invalidation.
    pub fn clear_cache(&self) {
        self.orchestrator.cache().clear();
        info!("analysis cache cleared");
    }

    /// Fetch, analyze and persist one category.
    ///
    /// Post-source and store failures propagate; analysis failures do not.
    /// An unavailable analysis is reported but not persisted, so the last
    /// good trend record survives a generation outage.
    pub async fn refresh_category(&self, category: &str) -> Result<CategoryReport> {
        let posts = self.source.fetch_posts(category).await?;
        let analysis = self.orchestrator.analyze(&posts).await;
        let chart = chart_data(&analysis.suggestions);

        if analysis.is_available() {
            self.store
                .upsert_trend(TrendRecord {
                    category: category.to_string(),
                    narrative: analysis.narrative_text.clone(),
                    chart_data: chart.clone(),
                    updated_at_ms: now_millis(),
                })
                .await?;
            info!(category, suggestions = chart.len(), "trend refreshed");
        } else {
            warn!(category, narrative = %analysis.narrative_text, "analysis unavailable, trend not updated");
        }

        Ok(CategoryReport {
            category: category.to_string(),
            posts_fetched: posts.len(),
            analysis,
            chart_data: chart,
        })
    }

    /// Refresh `category`, then generate and persist its poster.
    ///
    /// When the analysis is unavailable the stored poster is returned as is,
    /// or an unpersisted fallback if none exists yet. A generation outage
    /// never replaces the last good poster.
    pub async fn publish_poster(&self, category: &str) -> Result<PosterDocument> {
        let report = self.refresh_category(category).await?;
        if !report.analysis.is_available() {
            return self.stored_poster_or_fallback(category).await;
        }

        let poster = self
            .poster
            .generate(
                category,
                &report.analysis.narrative_text,
                &report.analysis.suggestions,
            )
            .await;

        self.store
            .upsert_poster(PosterRecord {
                category: category.to_string(),
                content: poster.html.clone(),
                origin: poster.origin,
                analysis: report.analysis.narrative_text,
                chart_data: report.chart_data,
                updated_at_ms: now_millis(),
            })
            .await?;
        info!(category, origin = %poster.origin, "poster published");
        Ok(poster)
    }

    async fn stored_poster_or_fallback(&self, category: &str) -> Result<PosterDocument> {
        match self.store.poster_by_category(category).await? {
            Some(record) => {
                warn!(category, "analysis unavailable, serving stored poster");
                Ok(PosterDocument {
                    html: record.content,
                    origin: record.origin,
                })
            }
            None => {
                warn!(category, "analysis unavailable and no stored poster, serving fallback");
                Ok(PosterDocument::fallback(compose_fallback(category, &[])))
            }
        }
    }

    /// Refresh several categories concurrently on the current task.
    ///
    /// Results are returned in input order; one failure does not stop the rest.
    pub async fn refresh_all(&self, categories: &[&str]) -> Vec<(String, Result<CategoryReport>)> {
        let refreshes = categories.iter().map(|c| async move {
            let result = self.refresh_category(c).await;
            if let Err(ref e) = result {
                warn!(category = *c, error = %e, "category refresh failed");
            }
            (c.to_string(), result)
        });
        join_all(refreshes).await
    }

    /// Like [`TrendPipeline::refresh_all`], but gives up waiting after `limit`.
    ///
    /// Refreshes still in flight are dropped at their current await point;
    /// a generation response that arrives after that is never cached.
    pub async fn refresh_all_within(
        &self,
        categories: &[&str],
        limit: Duration,
    ) -> Option<Vec<(String, Result<CategoryReport>)>> {
        tokio::time::timeout(limit, self.refresh_all(categories))
            .await
            .ok()
    }
}
