//! Pipeline configuration.
//!
//! Layered as: built-in defaults, then an optional YAML file, then
//! environment overrides. Every section is optional in YAML.
//!
//! ```yaml
//! generation:
//!   model: gemini-1.5-flash
//!   temperature: 0.2
//! analysis:
//!   max_considered_posts: 2
//!   cache_ttl_secs: 1800
//! poster:
//!   max_suggestions: 3
//! reddit:
//!   limit: 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Error, ErrorContext, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub analysis_max_output_tokens: u32,
    pub poster_max_output_tokens: u32,
    pub timeout_secs: u64,
    /// Usually unset: the key is then read from the keyring or `GEMINI_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: crate::generation::GEMINI_BASE_URL.to_string(),
            model: crate::generation::GEMINI_MODEL.to_string(),
            temperature: 0.2,
            analysis_max_output_tokens: 150,
            poster_max_output_tokens: 2048,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub max_considered_posts: usize,
    pub cache_ttl_secs: u64,
    /// Unset means the generation call is only bounded by the HTTP timeout.
    pub call_timeout_secs: Option<u64>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_considered_posts: crate::analysis::DEFAULT_MAX_CONSIDERED,
            cache_ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
            call_timeout_secs: None,
        }
    }
}

impl AnalysisSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterSettings {
    pub max_suggestions: usize,
    pub analysis_excerpt_chars: usize,
}

impl Default for PosterSettings {
    fn default() -> Self {
        Self {
            max_suggestions: crate::poster::DEFAULT_MAX_SUGGESTIONS,
            analysis_excerpt_chars: crate::poster::DEFAULT_EXCERPT_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditSettings {
    pub base_url: String,
    pub limit: u32,
    pub time_window: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for RedditSettings {
    fn default() -> Self {
        Self {
            base_url: crate::sources::REDDIT_BASE_URL.to_string(),
            limit: 5,
            time_window: "week".to_string(),
            user_agent: crate::sources::REDDIT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub generation: GenerationSettings,
    pub analysis: AnalysisSettings,
    pub poster: PosterSettings,
    pub reddit: RedditSettings,
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Defaults or `path`, with environment overrides applied and validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `TREND_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(model) = lookup("TREND_GEMINI_MODEL") {
            self.generation.model = model;
        }
        if let Some(url) = lookup("TREND_GEMINI_BASE_URL") {
            self.generation.base_url = url;
        }
        if let Some(v) = lookup("TREND_HTTP_TIMEOUT_SECS") {
            let secs = parse_override::<u64>("TREND_HTTP_TIMEOUT_SECS", &v)?;
            self.generation.timeout_secs = secs;
            self.reddit.timeout_secs = secs;
        }
        if let Some(v) = lookup("TREND_CACHE_TTL_SECS") {
            self.analysis.cache_ttl_secs = parse_override("TREND_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("TREND_MAX_CONSIDERED") {
            self.analysis.max_considered_posts = parse_override("TREND_MAX_CONSIDERED", &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.generation.model.trim().is_empty() {
            return Err(invalid("generation.model", "must not be empty"));
        }
        if self.analysis.max_considered_posts == 0 {
            return Err(invalid("analysis.max_considered_posts", "must be at least 1"));
        }
        if self.analysis.cache_ttl_secs == 0 {
            return Err(invalid("analysis.cache_ttl_secs", "must be positive"));
        }
        if self.analysis.call_timeout_secs == Some(0) {
            return Err(invalid("analysis.call_timeout_secs", "must be positive when set"));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        Error::configuration_with_context(
            format!("cannot parse {:?}", value),
            ErrorContext::new().with_field_path(name).with_source("env"),
        )
    })
}

fn invalid(field: &str, message: &str) -> Error {
    Error::configuration_with_context(
        message,
        ErrorContext::new().with_field_path(field).with_source("config"),
    )
}
