//! # trend-poster
//!
//! 趋势分析与内容生成流水线：从社区帖子中提炼零售产品建议，并生成经过校验的 HTML 海报。
//!
//! Trend analysis and content generation pipeline: turns a small, noisy set of
//! community posts into positionally-aligned product suggestions, then renders
//! them into an HTML poster that is guaranteed to be well formed.
//!
//! ## Overview
//!
//! Data flows one way:
//!
//! ```text
//! posts -> AnalysisOrchestrator (cache-checked) -> suggestions -> PosterGenerator -> HTML
//! ```
//!
//! - **Cached**: identical considered post sets within the TTL reuse the previous analysis
//! - **Total**: analysis and poster generation never fail; they degrade or fall back
//! - **Validated**: every poster passes [`poster::HtmlValidator`] before it is returned
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trend_poster::config::PipelineConfig;
//! use trend_poster::store::InMemoryTrendStore;
//! use trend_poster::TrendPipeline;
//!
//! #[tokio::main]
//! async fn main() -> trend_poster::Result<()> {
//!     let config = PipelineConfig::load(None)?;
//!     let pipeline = TrendPipeline::from_config(&config, Arc::new(InMemoryTrendStore::new()))?;
//!
//!     let poster = pipeline.publish_poster("Electronics").await?;
//!     println!("{} ({} bytes)", poster.origin, poster.html.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Posts, suggestions, analysis results, poster documents |
//! | [`cache`] | TTL-bounded response cache keyed by post-set fingerprint |
//! | [`generation`] | Generation service boundary and Gemini client |
//! | [`analysis`] | Suggestion alignment and the analysis orchestrator |
//! | [`poster`] | HTML validation, fallback composition, poster generation |
//! | [`sources`] | Post source collaborator (Reddit) |
//! | [`store`] | Persistence collaborator for trend and poster records |
//! | [`pipeline`] | Category-level composition of all of the above |
//! | [`config`] | Defaults, YAML and environment configuration |

pub mod analysis;
pub mod cache;
pub mod config;
pub mod generation;
pub mod pipeline;
pub mod poster;
pub mod sources;
pub mod store;
pub mod transport;
pub mod types;

pub use analysis::AnalysisOrchestrator;
pub use cache::{CacheKey, ResponseCache};
pub use generation::TextGenerator;
pub use pipeline::{CategoryReport, TrendPipeline, DEFAULT_CATEGORIES};
pub use poster::{compose_fallback, HtmlValidator, PosterGenerator};
pub use types::{AnalysisResult, Post, PosterDocument, PosterOrigin, Suggestion};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
