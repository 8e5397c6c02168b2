//! Reddit search listing source.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::PostSource;
use crate::transport::HttpTransport;
use crate::types::Post;
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_USER_AGENT: &str = "RetailTrendDashboard/1.0";

/// Subreddit searched for a category; anything unmapped searches `all`.
pub fn subreddit_for(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "food" => "food",
        "dress" => "fashion",
        "makeup" => "MakeupAddiction",
        _ => "all",
    }
}

/// Fetches the week's top posts matching a category from Reddit search.
pub struct RedditPostSource {
    transport: HttpTransport,
    limit: u32,
    time_window: String,
}

impl RedditPostSource {
    pub fn builder() -> RedditPostSourceBuilder {
        RedditPostSourceBuilder::new()
    }

    fn parse_listing(&self, body: &Value) -> Result<Vec<Post>> {
        let children = body
            .pointer("/data/children")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                Error::validation_with_context(
                    "Invalid Reddit response format",
                    ErrorContext::new()
                        .with_field_path("data.children")
                        .with_source("reddit"),
                )
            })?;

        let base = Url::parse(self.transport.base_url()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base url: {}", e),
                ErrorContext::new()
                    .with_field_path("reddit.base_url")
                    .with_source("reddit"),
            )
        })?;

        let mut posts = Vec::with_capacity(children.len());
        for child in children {
            let data = &child["data"];
            let Some(id) = data.get("id").and_then(|v| v.as_str()) else {
                tracing::debug!("skipping reddit child without id");
                continue;
            };
            let title = data.get("title").and_then(|v| v.as_str()).unwrap_or_default();
            let upvotes = data.get("ups").and_then(|v| v.as_i64()).unwrap_or(0).max(0) as u64;
            let url = data
                .get("permalink")
                .and_then(|v| v.as_str())
                .and_then(|p| base.join(p).ok())
                .map(String::from)
                .unwrap_or_default();
            posts.push(Post::new(id, title, upvotes, url));
        }
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for RedditPostSource {
    async fn fetch_posts(&self, category: &str) -> Result<Vec<Post>> {
        let path = format!("/r/{}/search.json", subreddit_for(category));
        let query = category.to_lowercase();
        let limit = self.limit.to_string();
        let body = self
            .transport
            .get_json(
                &path,
                &[
                    ("q", query.as_str()),
                    ("restrict_sr", "1"),
                    ("sort", "top"),
                    ("t", self.time_window.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        let posts = self.parse_listing(&body)?;
        tracing::info!(category, posts = posts.len(), "fetched trending posts");
        Ok(posts)
    }
}

pub struct RedditPostSourceBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    limit: u32,
    time_window: String,
    timeout_secs: u64,
}

impl RedditPostSourceBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            limit: 5,
            time_window: "week".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn time_window(mut self, window: impl Into<String>) -> Self {
        self.time_window = window.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<RedditPostSource> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let transport = HttpTransport::new(
            &base_url,
            Duration::from_secs(self.timeout_secs),
            Some(&user_agent),
        )?;
        Ok(RedditPostSource {
            transport,
            limit: self.limit,
            time_window: self.time_window,
        })
    }
}

impl Default for RedditPostSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subreddit_mapping() {
        assert_eq!(subreddit_for("Food"), "food");
        assert_eq!(subreddit_for("dress"), "fashion");
        assert_eq!(subreddit_for("MAKEUP"), "MakeupAddiction");
        assert_eq!(subreddit_for("Electronics"), "all");
    }

    #[test]
    fn test_parse_listing() {
        let source = RedditPostSource::builder().build().unwrap();
        let body = json!({
            "data": { "children": [
                { "data": { "id": "a1", "title": "best budget headphones", "ups": 120, "permalink": "/r/all/comments/a1/x/" } },
                { "data": { "id": "b2", "title": "downvoted", "ups": -3, "permalink": "/r/all/comments/b2/y/" } },
                { "data": { "title": "no id" } }
            ]}
        });
        let posts = source.parse_listing(&body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, "https://www.reddit.com/r/all/comments/a1/x/");
        assert_eq!(posts[0].upvotes, 120);
        assert_eq!(posts[1].upvotes, 0);
    }

    #[test]
    fn test_parse_listing_rejects_unexpected_shape() {
        let source = RedditPostSource::builder().build().unwrap();
        let err = source.parse_listing(&json!({"kind": "Listing"})).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
