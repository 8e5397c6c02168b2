//! Poster document types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a poster's HTML came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterOrigin {
    /// Produced by the generation service and accepted by the validator.
    Generated,
    /// Composed locally after the generation call failed or its output was rejected.
    Fallback,
}

impl PosterOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterOrigin::Generated => "generated",
            PosterOrigin::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PosterOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete HTML poster. `html` always passes [`crate::poster::HtmlValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterDocument {
    pub html: String,
    pub origin: PosterOrigin,
}

impl PosterDocument {
    pub fn generated(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            origin: PosterOrigin::Generated,
        }
    }

    pub fn fallback(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            origin: PosterOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == PosterOrigin::Fallback
    }
}
