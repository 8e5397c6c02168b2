//! Time-bounded response cache.

use super::clock::{Clock, SystemClock};
use super::key::CacheKey;
use crate::types::AnalysisResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Entries older than this are treated as absent.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale: u64,
    pub sets: u64,
    pub clears: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    sets: AtomicU64,
    clears: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            clears: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone)]
struct CacheEntry {
    payload: AnalysisResult,
    stored_at: Instant,
}

/// Process-lifetime cache from post-set fingerprint to analysis result.
///
/// Freshness is checked on lookup only. Stale entries stay in memory until
/// the same key is stored again, [`ResponseCache::evict_expired`] runs, or the
/// cache is cleared; there is no background sweep and no size bound.
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    stats: AtomicStats,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            stats: AtomicStats::new(),
        }
    }

    /// Cache with the default 30 minute TTL on the system clock.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TTL, Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached result for `key` if it is still fresh.
    pub fn lookup(&self, key: &CacheKey) -> Option<AnalysisResult> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if !self.is_expired(entry, now) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.payload.clone())
            }
            Some(_) => {
                self.stats.stale.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `result` under `key`, replacing any entry and resetting its timestamp.
    pub fn store(&self, key: CacheKey, result: AnalysisResult) {
        let entry = CacheEntry {
            payload: result,
            stored_at: self.clock.now(),
        };
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, entry);
        self.stats.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.stats.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop entries that are already stale. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, e| !self.is_expired(e, now));
        before - entries.len()
    }

    /// Number of entries held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) >= self.ttl
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::types::Suggestion;

    fn sample(narrative: &str) -> AnalysisResult {
        AnalysisResult::new(narrative, vec![Suggestion::new("Parka", 80, "cheap winter coats")])
    }

    fn cache_with_clock() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (ResponseCache::new(DEFAULT_TTL, clock.clone()), clock)
    }

    #[test]
    fn test_lookup_hit_within_ttl() {
        let (cache, clock) = cache_with_clock();
        let key = CacheKey::from_ids(["a", "b"]);
        cache.store(key.clone(), sample("first"));
        clock.advance(Duration::from_secs(29 * 60));
        assert_eq!(cache.lookup(&key), Some(sample("first")));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_entry_expires_at_ttl_boundary() {
        let (cache, clock) = cache_with_clock();
        let key = CacheKey::from_ids(["a"]);
        cache.store(key.clone(), sample("first"));
        clock.advance(DEFAULT_TTL);
        assert_eq!(cache.lookup(&key), None);
        // Not purged on lookup.
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().stale, 1);
    }

    #[test]
    fn test_store_resets_freshness() {
        let (cache, clock) = cache_with_clock();
        let key = CacheKey::from_ids(["a"]);
        cache.store(key.clone(), sample("old"));
        clock.advance(DEFAULT_TTL + Duration::from_secs(1));
        assert!(cache.lookup(&key).is_none());

        cache.store(key.clone(), sample("new"));
        assert_eq!(cache.lookup(&key), Some(sample("new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_independent_keys() {
        let (cache, _clock) = cache_with_clock();
        cache.store(CacheKey::from_ids(["a", "b"]), sample("ab"));
        assert!(cache.lookup(&CacheKey::from_ids(["a"])).is_none());
        assert!(cache.lookup(&CacheKey::from_ids(["b", "a"])).is_none());
    }

    #[test]
    fn test_clear_and_evict_expired() {
        let (cache, clock) = cache_with_clock();
        cache.store(CacheKey::from_ids(["old"]), sample("old"));
        clock.advance(DEFAULT_TTL);
        cache.store(CacheKey::from_ids(["fresh"]), sample("fresh"));

        assert_eq!(cache.evict_expired(), 1);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.lookup(&CacheKey::from_ids(["fresh"])).is_none());
    }
}
