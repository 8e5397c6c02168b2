//! 持久化边界：趋势与海报记录的存取（按类别 upsert，按时间读取最新）。
//!
//! # Store Module
//!
//! The pipeline persists its outputs through [`TrendStore`]. The store is a
//! collaborator: it keys records by category and orders posters by recency.
//! [`InMemoryTrendStore`] is the bundled implementation.

mod memory;
mod records;

pub use memory::InMemoryTrendStore;
pub use records::{chart_data, now_millis, PosterRecord, TrendRecord};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TrendStore: Send + Sync {
    /// Insert or replace the trend record for `record.category`.
    async fn upsert_trend(&self, record: TrendRecord) -> Result<()>;

    async fn trend_by_category(&self, category: &str) -> Result<Option<TrendRecord>>;

    /// Insert or replace the poster record for `record.category`.
    async fn upsert_poster(&self, record: PosterRecord) -> Result<()>;

    async fn poster_by_category(&self, category: &str) -> Result<Option<PosterRecord>>;

    /// Most recently updated poster across all categories.
    async fn latest_poster(&self) -> Result<Option<PosterRecord>>;
}
