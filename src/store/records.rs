//! Persisted record shapes.

use crate::types::{PosterOrigin, Suggestion};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub category: String,
    pub narrative: String,
    pub chart_data: Vec<Suggestion>,
    pub updated_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterRecord {
    pub category: String,
    pub content: String,
    pub origin: PosterOrigin,
    pub analysis: String,
    pub chart_data: Vec<Suggestion>,
    pub updated_at_ms: u64,
}

/// Suggestions worth charting: non-empty product text and at least one upvote.
pub fn chart_data(suggestions: &[Suggestion]) -> Vec<Suggestion> {
    suggestions
        .iter()
        .filter(|s| !s.product.trim().is_empty() && s.upvotes > 0)
        .cloned()
        .collect()
}

/// Milliseconds since the Unix epoch, 0 if the system clock is before it.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
