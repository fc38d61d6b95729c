//! Secret redaction for log output.

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r#"(?i)CLAUDE_API_KEY["']?\s*[:=]\s*["']?[^"'\s]+"#, "CLAUDE_API_KEY=***REDACTED***"),
        (r#"(?i)api[_-]?key["']?\s*[:=]\s*["']?[^"'\s]+"#, "api_key=***REDACTED***"),
        (r#"(?i)token["']?\s*[:=]\s*["']?[^"'\s]+"#, "token=***REDACTED***"),
        (r#"(?i)password["']?\s*[:=]\s*["']?[^"'\s]+"#, "password=***REDACTED***"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Mask API keys, tokens and passwords in free text before it is logged.
pub fn redact_secrets(text: &str) -> String {
    REDACTION_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}
