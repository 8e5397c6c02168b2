//! 类型模块：趋势分析与海报生成的核心数据类型。
//!
//! # Types Module
//!
//! Data carried through the pipeline, leaves first:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Post`] | Externally sourced discussion post with an engagement score |
//! | [`Suggestion`] | One product suggestion, positionally aligned to a post |
//! | [`AnalysisResult`] | Narrative text plus the aligned suggestions |
//! | [`PosterDocument`] | Final HTML artifact tagged with its [`PosterOrigin`] |
//!
//! All of them serialize with `serde` so the persistence store can keep them
//! as opaque records.

pub mod analysis;
pub mod post;
pub mod poster;

pub use analysis::{AnalysisResult, Suggestion};
pub use post::Post;
pub use poster::{PosterDocument, PosterOrigin};
