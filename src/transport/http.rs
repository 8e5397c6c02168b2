use crate::Result;
use keyring::Entry;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::env;
use std::time::Duration;

/// Longest slice of a non-2xx response body kept in [`crate::Error::Remote`].
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Thin JSON-over-HTTP transport shared by the generation service and the post source.
///
/// Non-2xx responses become [`crate::Error::Remote`] carrying the response body,
/// so callers only ever see parsed JSON on success.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ua) = user_agent {
            let value = HeaderValue::from_str(ua)
                .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
            headers.insert(USER_AGENT, value);
        }

        let pool_idle_secs = env::var("TREND_HTTP_POOL_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(90);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .pool_idle_timeout(Some(Duration::from_secs(pool_idle_secs)))
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn post_json(
        &self,
        path: &str,
        headers: HeaderMap,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.post(&url).headers(headers).json(body);
        Self::send(request).await
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.get(&url).query(query);
        Self::send(request).await
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<serde_json::Value> {
        // Request URLs may carry credentials; keep them out of error text.
        let response = request
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e.without_url())))?;

        if !status.is_success() {
            return Err(crate::Error::remote(status.as_u16(), body_excerpt(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Bound a response body to [`MAX_ERROR_BODY_CHARS`] characters.
pub fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}… ({} bytes total)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/// Header value marked sensitive so it is redacted from `Debug` output.
pub fn secret_header(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Resolve an API key: OS keyring first, then the environment variable.
pub fn resolve_api_key(service: &str, account: &str, env_var: &str) -> Option<String> {
    if let Ok(entry) = Entry::new(service, account) {
        if let Ok(key) = entry.get_password() {
            return Some(key);
        }
    }
    env::var(env_var).ok().filter(|k| !k.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
