//! 生成服务边界：把外部文本生成服务抽象为单一的 `generate(prompt) -> text` 调用。
//!
//! # Generation Service Boundary
//!
//! The rest of the pipeline only sees [`TextGenerator`]. Every accepted
//! response shape is normalized to plain text by [`extract_text`] before it
//! leaves this module; anything without usable text becomes
//! [`crate::Error::Unextractable`].

mod extract;
mod gemini;

pub use extract::extract_text;
pub use gemini::{
    GeminiGenerator, GeminiGeneratorBuilder, DEFAULT_BASE_URL as GEMINI_BASE_URL,
    DEFAULT_MODEL as GEMINI_MODEL,
};

use crate::Result;
use async_trait::async_trait;

/// An opaque, possibly slow, possibly malformed-output text generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str {
        "generator"
    }
}
