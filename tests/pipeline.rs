//! End-to-end pipeline scenarios with scripted collaborators.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use trend_poster::analysis::{AnalysisOrchestrator, NO_SUGGESTION, UNAVAILABLE_NARRATIVE};
use trend_poster::cache::ResponseCache;
use trend_poster::generation::TextGenerator;
use trend_poster::poster::{HtmlValidator, PosterGenerator};
use trend_poster::sources::PostSource;
use trend_poster::store::{InMemoryTrendStore, TrendStore};
use trend_poster::{Error, Post, PosterOrigin, Result, Suggestion, TrendPipeline};

struct Scripted {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::remote(503, "no more replies")))
    }
}

struct FixedPosts(Vec<Post>);

#[async_trait]
impl PostSource for FixedPosts {
    async fn fetch_posts(&self, category: &str) -> Result<Vec<Post>> {
        if category == "Broken" {
            return Err(Error::remote(500, "listing unavailable"));
        }
        Ok(self.0.clone())
    }
}

fn scenario_posts() -> Vec<Post> {
    vec![
        Post::new("a", "best budget headphones", 120, "u1"),
        Post::new("b", "cheap winter coats", 80, "u2"),
    ]
}

fn pipeline(
    analysis: Arc<Scripted>,
    poster: Arc<Scripted>,
) -> (TrendPipeline, Arc<InMemoryTrendStore>) {
    let store = Arc::new(InMemoryTrendStore::new());
    let orchestrator = AnalysisOrchestrator::new(Arc::new(ResponseCache::with_defaults()), analysis);
    let pipeline = TrendPipeline::new(
        Arc::new(FixedPosts(scenario_posts())),
        store.clone(),
        orchestrator,
        PosterGenerator::new(poster),
    );
    (pipeline, store)
}

#[tokio::test]
async fn test_aligned_suggestions_from_bullets() {
    let analysis = Scripted::new(vec![Ok("• Wireless earbuds\n• Insulated parka".into())]);
    let (pipeline, store) = pipeline(analysis, Scripted::new(vec![]));

    let report = pipeline.refresh_category("Electronics").await.unwrap();
    assert_eq!(
        report.analysis.suggestions,
        vec![
            Suggestion::new("Wireless earbuds", 120, "best budget headphones"),
            Suggestion::new("Insulated parka", 80, "cheap winter coats"),
        ]
    );

    let stored = store.trend_by_category("Electronics").await.unwrap().unwrap();
    assert_eq!(stored.chart_data, report.analysis.suggestions);
}

#[tokio::test]
async fn test_poster_falls_back_when_generation_fails() {
    let analysis = Scripted::new(vec![Ok("• Wireless earbuds\n• Insulated parka".into())]);
    let poster_gen = Scripted::new(vec![Err(Error::remote(500, "internal"))]);
    let (pipeline, store) = pipeline(analysis, poster_gen.clone());

    let poster = pipeline.publish_poster("Electronics").await.unwrap();
    assert_eq!(poster.origin, PosterOrigin::Fallback);
    assert!(poster.html.contains("Electronics"));
    assert!(poster.html.contains("Wireless earbuds"));
    assert!(poster.html.contains("Insulated parka"));
    assert!(HtmlValidator::new().validate(&poster.html).is_valid());
    assert_eq!(poster_gen.calls(), 1);

    let latest = store.latest_poster().await.unwrap().unwrap();
    assert_eq!(latest.category, "Electronics");
    assert_eq!(latest.origin, PosterOrigin::Fallback);
    assert_eq!(latest.content, poster.html);
}

#[tokio::test]
async fn test_single_bullet_fills_placeholder() {
    let analysis = Scripted::new(vec![Ok("• Only one bullet".into())]);
    let (pipeline, _) = pipeline(analysis, Scripted::new(vec![]));

    let report = pipeline.refresh_category("Electronics").await.unwrap();
    assert_eq!(
        report.analysis.suggestions,
        vec![
            Suggestion::new("Only one bullet", 120, "best budget headphones"),
            Suggestion::new(NO_SUGGESTION, 80, "cheap winter coats"),
        ]
    );
}

#[tokio::test]
async fn test_repeat_refresh_hits_cache_until_cleared() {
    let analysis = Scripted::new(vec![
        Ok("• A\n• B".into()),
        Ok("• C\n• D".into()),
    ]);
    let (pipeline, _) = pipeline(analysis.clone(), Scripted::new(vec![]));

    pipeline.refresh_category("Sports").await.unwrap();
    pipeline.refresh_category("Pets").await.unwrap();
    assert_eq!(analysis.calls(), 1);

    pipeline.clear_cache();
    let report = pipeline.refresh_category("Sports").await.unwrap();
    assert_eq!(analysis.calls(), 2);
    assert_eq!(report.analysis.suggestions[0].product, "C");
}

#[tokio::test]
async fn test_unavailable_analysis_keeps_previous_trend() {
    let analysis = Scripted::new(vec![Ok("• A\n• B".into())]);
    let (pipeline, store) = pipeline(analysis, Scripted::new(vec![]));
    pipeline.refresh_category("Grocery").await.unwrap();

    pipeline.clear_cache();
    let report = pipeline.refresh_category("Grocery").await.unwrap();
    assert_eq!(report.analysis.narrative_text, UNAVAILABLE_NARRATIVE);
    assert!(report.analysis.suggestions.is_empty());

    let stored = store.trend_by_category("Grocery").await.unwrap().unwrap();
    assert_eq!(stored.chart_data.len(), 2);
}

#[tokio::test]
async fn test_generated_poster_is_sanitized() {
    let doc = "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Electronics</title></head><body><h1>Wireless earbuds</h1></body></html>";
    let analysis = Scripted::new(vec![Ok("• Wireless earbuds\n• Insulated parka".into())]);
    let poster_gen = Scripted::new(vec![Ok(format!(
        "Sure! Here is a draft <!DOCTYPE html>\n```html\n{}\n```",
        doc
    ))]);
    let (pipeline, _) = pipeline(analysis, poster_gen);
    let poster = pipeline.publish_poster("Electronics").await.unwrap();
    assert_eq!(poster.origin, PosterOrigin::Generated);
    assert_eq!(poster.html, doc);
}

#[tokio::test]
async fn test_refresh_all_isolates_failures() {
    let analysis = Scripted::new(vec![Ok("• A\n• B".into())]);
    let (pipeline, _) = pipeline(analysis.clone(), Scripted::new(vec![]));

    let results = pipeline.refresh_all(&["Broken", "Toys and Baby"]).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "Broken");
    assert!(matches!(results[0].1, Err(Error::Remote { status: 500, .. })));
    assert!(results[1].1.is_ok());
    assert_eq!(analysis.calls(), 1);
}

#[tokio::test]
async fn test_from_config_wires_http_collaborators() {
    use mockito::{Matcher, Server};
    use trend_poster::config::PipelineConfig;

    let mut server = Server::new_async().await;
    let listing = server
        .mock("GET", "/r/food/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":{"children":[
                {"data":{"id":"p1","title":"air fryer recipes","ups":900,"permalink":"/r/food/comments/p1/"}},
                {"data":{"id":"p2","title":"meal prep containers","ups":450,"permalink":"/r/food/comments/p2/"}}
            ]}}"#,
        )
        .create_async()
        .await;
    let analysis = server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "generationConfig": { "maxOutputTokens": 150 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"parts":[{"text":"• Air fryer\n• Glass containers"}]}}]}"#,
        )
        .create_async()
        .await;
    let poster = server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "generationConfig": { "maxOutputTokens": 2048 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"not a document"}]}}]}"#)
        .create_async()
        .await;

    let mut config = PipelineConfig::default();
    config.generation.base_url = server.url();
    config.generation.api_key = Some("test-key".to_string());
    config.reddit.base_url = server.url();

    let store = Arc::new(InMemoryTrendStore::new());
    let pipeline = TrendPipeline::from_config(&config, store.clone()).unwrap();
    let doc = pipeline.publish_poster("Food").await.unwrap();

    listing.assert_async().await;
    analysis.assert_async().await;
    poster.assert_async().await;
    assert_eq!(doc.origin, PosterOrigin::Fallback);
    assert!(doc.html.contains("Air fryer"));
    assert!(doc.html.contains("Glass containers"));

    let trend = store.trend_by_category("Food").await.unwrap().unwrap();
    assert_eq!(trend.chart_data[0].upvotes, 900);
}

#[tokio::test]
async fn test_unavailable_analysis_keeps_previous_poster() {
    let analysis = Scripted::new(vec![Ok("• Wireless earbuds\n• Insulated parka".into())]);
    let poster_gen = Scripted::new(vec![Err(Error::remote(500, "internal"))]);
    let (pipeline, store) = pipeline(analysis, poster_gen.clone());

    let first = pipeline.publish_poster("Electronics").await.unwrap();
    pipeline.clear_cache();
    let second = pipeline.publish_poster("Electronics").await.unwrap();

    assert_eq!(second, first);
    assert_eq!(poster_gen.calls(), 1);
    let stored = store.poster_by_category("Electronics").await.unwrap().unwrap();
    assert!(stored.content.contains("Wireless earbuds"));
    assert_ne!(stored.analysis, UNAVAILABLE_NARRATIVE);
    assert_eq!(stored.chart_data.len(), 2);
}

#[tokio::test]
async fn test_unavailable_analysis_without_stored_poster_is_not_persisted() {
    let poster_gen = Scripted::new(vec![]);
    let (pipeline, store) = pipeline(Scripted::new(vec![]), poster_gen.clone());

    let poster = pipeline.publish_poster("Pets").await.unwrap();
    assert_eq!(poster.origin, PosterOrigin::Fallback);
    assert!(poster.html.contains("Pets"));
    assert!(HtmlValidator::new().validate(&poster.html).is_valid());
    assert_eq!(poster_gen.calls(), 0);
    assert!(store.latest_poster().await.unwrap().is_none());
}

struct Stalled;

#[async_trait]
impl TextGenerator for Stalled {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok("• Late\n• Later".into())
    }
}

#[tokio::test]
async fn test_refresh_all_within_drops_late_analyses_uncached() {
    let cache = Arc::new(ResponseCache::with_defaults());
    let store = Arc::new(InMemoryTrendStore::new());
    let pipeline = TrendPipeline::new(
        Arc::new(FixedPosts(scenario_posts())),
        store.clone(),
        AnalysisOrchestrator::new(cache.clone(), Arc::new(Stalled)),
        PosterGenerator::new(Scripted::new(vec![])),
    );

    let results = pipeline
        .refresh_all_within(&["Sports", "Pets"], std::time::Duration::from_millis(20))
        .await;
    assert!(results.is_none());
    assert!(cache.is_empty());
    assert!(store.trend_by_category("Sports").await.unwrap().is_none());
}
