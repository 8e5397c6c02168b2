//! Gemini generateContent 客户端
//!
//! Google Gemini generateContent client. Notes:
//! - Single-turn `contents` with one `user` part per call.
//! - `generationConfig` wraps temperature and `maxOutputTokens`.
//! - API key travels in the `x-goog-api-key` header, never in the URL.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use std::time::Duration;

use super::{extract_text, TextGenerator};
use crate::transport::{resolve_api_key, secret_header, HttpTransport};
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text generator backed by the Gemini generateContent API.
pub struct GeminiGenerator {
    transport: HttpTransport,
    model: String,
    auth_headers: HeaderMap,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
}

impl GeminiGenerator {
    pub fn builder() -> GeminiGeneratorBuilder {
        GeminiGeneratorBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        let mut gen_config = json!({});
        if let Some(t) = self.temperature {
            gen_config["temperature"] = json!(t);
        }
        if let Some(mt) = self.max_output_tokens {
            gen_config["maxOutputTokens"] = json!(mt);
        }
        if gen_config != json!({}) {
            body["generationConfig"] = gen_config;
        }
        body
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let path = format!("/models/{}:generateContent", self.model);
        let body = self.build_body(prompt);
        let response = self
            .transport
            .post_json(&path, self.auth_headers.clone(), &body)
            .await?;
        extract_text(&response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

pub struct GeminiGeneratorBuilder {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
    timeout_secs: u64,
}

impl GeminiGeneratorBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            temperature: None,
            max_output_tokens: None,
            timeout_secs: 30,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<GeminiGenerator> {
        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Model must not be empty",
                ErrorContext::new()
                    .with_field_path("generation.model")
                    .with_source("gemini"),
            ));
        }
        let api_key = self
            .api_key
            .or_else(|| resolve_api_key("trend-poster", "gemini", "GEMINI_API_KEY"))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key required (keyring trend-poster/gemini or GEMINI_API_KEY)",
                    ErrorContext::new().with_source("gemini"),
                )
            })?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(API_KEY_HEADER, secret_header(&api_key)?);
        let transport =
            HttpTransport::new(&base_url, Duration::from_secs(self.timeout_secs), None)?;
        Ok(GeminiGenerator {
            transport,
            model,
            auth_headers,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        })
    }
}

impl Default for GeminiGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
