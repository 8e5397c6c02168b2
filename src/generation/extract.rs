//! Response-shape normalization.

use crate::{Error, Result};
use serde_json::Value;

/// Map any accepted response body to plain text.
///
/// Accepted shapes, first match wins:
/// - Gemini: `candidates[0].content.parts[*].text` (concatenated)
/// - OpenAI-compatible: `choices[0].message.content`
/// - bare `text` or `output` string fields
///
/// An `error` object maps to [`Error::Remote`]; missing or blank text maps to
/// [`Error::Unextractable`].
pub fn extract_text(body: &Value) -> Result<String> {
    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        let status = err
            .get("code")
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(500);
        let message = err
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| err.to_string());
        return Err(Error::remote(status, message));
    }

    let text = gemini_text(body)
        .or_else(|| string_at(body, "/choices/0/message/content"))
        .or_else(|| string_at(body, "/text"))
        .or_else(|| string_at(body, "/output"));

    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        Some(_) => Err(Error::unextractable("response text is empty")),
        None => Err(Error::unextractable(blocked_reason(body).unwrap_or_else(|| {
            "no text field in response".to_string()
        }))),
    }
}

fn gemini_text(body: &Value) -> Option<String> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

fn string_at(body: &Value, pointer: &str) -> Option<String> {
    body.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(String::from)
}

// Gemini answers 200 with no parts when a prompt or candidate is blocked.
fn blocked_reason(body: &Value) -> Option<String> {
    if let Some(reason) = body
        .pointer("/promptFeedback/blockReason")
        .and_then(|r| r.as_str())
    {
        return Some(format!("prompt blocked: {}", reason));
    }
    body.pointer("/candidates/0/finishReason")
        .and_then(|r| r.as_str())
        .filter(|r| *r != "STOP")
        .map(|r| format!("candidate finished without text: {}", r))
}
