//! In-memory store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::{PosterRecord, TrendRecord, TrendStore};
use crate::Result;

/// Process-local [`TrendStore`], keyed by category.
#[derive(Default)]
pub struct InMemoryTrendStore {
    trends: RwLock<HashMap<String, TrendRecord>>,
    posters: RwLock<HashMap<String, (u64, PosterRecord)>>,
    sequence: AtomicU64,
}

impl InMemoryTrendStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn trend_count(&self) -> usize {
        self.trends.read().await.len()
    }
}

#[async_trait]
impl TrendStore for InMemoryTrendStore {
    async fn upsert_trend(&self, record: TrendRecord) -> Result<()> {
        self.trends
            .write()
            .await
            .insert(record.category.clone(), record);
        Ok(())
    }

    async fn trend_by_category(&self, category: &str) -> Result<Option<TrendRecord>> {
        Ok(self.trends.read().await.get(category).cloned())
    }

    async fn upsert_poster(&self, record: PosterRecord) -> Result<()> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.posters
            .write()
            .await
            .insert(record.category.clone(), (seq, record));
        Ok(())
    }

    async fn poster_by_category(&self, category: &str) -> Result<Option<PosterRecord>> {
        Ok(self
            .posters
            .read()
            .await
            .get(category)
            .map(|(_, r)| r.clone()))
    }

    async fn latest_poster(&self) -> Result<Option<PosterRecord>> {
        // Ties on timestamp go to the later write.
        Ok(self
            .posters
            .read()
            .await
            .values()
            .max_by_key(|(seq, r)| (r.updated_at_ms, *seq))
            .map(|(_, r)| r.clone()))
    }
}
