//! 帖子来源：按类别获取排名靠前的社区帖子。
//!
//! The pipeline only depends on [`PostSource`]; [`RedditPostSource`] is the
//! bundled implementation.

mod reddit;

pub use reddit::{
    subreddit_for, RedditPostSource, RedditPostSourceBuilder, DEFAULT_BASE_URL as REDDIT_BASE_URL,
    DEFAULT_USER_AGENT as REDDIT_USER_AGENT,
};

use crate::types::Post;
use crate::Result;
use async_trait::async_trait;

/// Supplies the ranked post list for a category.
///
/// A failure here means the analysis is never invoked for that batch.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self, category: &str) -> Result<Vec<Post>>;
}
