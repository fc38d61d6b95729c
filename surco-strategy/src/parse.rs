//! Model response decoding.

use once_cell::sync::Lazy;
use regex::Regex;
use surco_core::{ContentStrategy, StrategyError};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("valid regex"));

/// Remove an enclosing code fence, labelled (```json) or not.
///
/// Text that does not start with a fence is returned trimmed and otherwise
/// untouched. An unterminated fence has its markers removed.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with("```") {
        return text.to_string();
    }

    match FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => text.replace("```json", "").replace("```", "").trim().to_string(),
    }
}

/// Decode a model response into a [`ContentStrategy`].
///
/// # Errors
/// `StrategyError::MalformedResponse` carrying the raw text when the body is
/// not JSON or lacks a required field.
pub fn parse_strategy(raw: &str) -> Result<ContentStrategy, StrategyError> {
    let body = strip_code_fence(raw);
    serde_json::from_str::<ContentStrategy>(&body).map_err(|e| {
        StrategyError::MalformedResponse {
            reason: e.to_string(),
            raw: raw.trim().to_string(),
        }
    })
}
