//! Cache key generation.

use crate::types::Post;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fingerprint of an ordered set of considered posts.
///
/// Order-sensitive: the same posts in a different order produce a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub hash: String,
}

impl CacheKey {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Fingerprint the identifiers of `posts`, in order.
    pub fn from_posts(posts: &[Post]) -> Self {
        Self::from_ids(posts.iter().map(|p| p.id.as_str()))
    }

    /// Fingerprint an ordered sequence of post identifiers.
    ///
    /// Identifiers are JSON-encoded as an array before hashing so that
    /// `["a-b", "c"]` and `["a", "b-c"]` never collide.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: Vec<&str> = ids.into_iter().collect();
        let canonical = serde_json::to_string(&ids).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self::new(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
