//! 海报生成模块：生成 HTML 海报，严格校验，失败时使用确定性后备文档。
//!
//! # Poster Module
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`PosterGenerator`] | Generation call, validation, fallback selection |
//! | [`HtmlValidator`] | Fence stripping, last-document truncation, parse and closing-tag checks |
//! | [`compose_fallback`] | Always-valid local poster |
//! | [`poster_prompt`] | Prompt with bounded suggestions and analysis excerpt |
//!
//! Every [`crate::types::PosterDocument`] returned from this module passes
//! [`HtmlValidator`], whichever path produced it.

mod fallback;
mod generator;
mod prompt;
mod validator;

pub use fallback::compose_fallback;
pub use generator::{PosterGenerator, DEFAULT_EXCERPT_CHARS, DEFAULT_MAX_SUGGESTIONS};
pub use prompt::{excerpt, poster_prompt};
pub use validator::{sanitize, HtmlValidation, HtmlValidator, InvalidReason};
