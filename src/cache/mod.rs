//! 响应缓存模块：按帖子集合指纹缓存分析结果，避免重复调用生成服务。
//!
//! # Response Caching Module
//!
//! Maps a deterministic fingerprint of the considered post set to a previously
//! computed [`crate::types::AnalysisResult`], so repeated refreshes of the same
//! posts do not hit the rate-limited generation service.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ResponseCache`] | TTL-bounded in-memory cache with lazy expiry |
//! | [`CacheKey`] | Order-sensitive fingerprint of post identifiers |
//! | [`Clock`] | Injected time source ([`SystemClock`], [`ManualClock`]) |
//! | [`CacheStats`] | Hit/miss counters |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use trend_poster::cache::{CacheKey, ResponseCache, SystemClock};
//! use trend_poster::types::AnalysisResult;
//!
//! let cache = ResponseCache::new(Duration::from_secs(1800), Arc::new(SystemClock));
//! let key = CacheKey::from_ids(["a", "b"]);
//! cache.store(key.clone(), AnalysisResult::degraded("nothing yet"));
//! assert!(cache.lookup(&key).is_some());
//! ```

mod clock;
mod key;
mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use manager::{CacheStats, ResponseCache, DEFAULT_TTL};
