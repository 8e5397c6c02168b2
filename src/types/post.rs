//! Community post as received from the post source.

use serde::{Deserialize, Serialize};

/// A ranked discussion post. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub upvotes: u64,
    pub url: String,
}

impl Post {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        upvotes: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            upvotes,
            url: url.into(),
        }
    }
}
