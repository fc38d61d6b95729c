//! Error types for surco operations

use thiserror::Error;

/// Quota errors surfaced to callers once an admission check rejects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("{message}")]
    Exceeded {
        endpoint: String,
        message: String,
        retry_after_secs: u64,
    },
}

/// LLM collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No LLM provider configured")]
    ProviderNotConfigured,

    #[error("LLM provider {provider} unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("Request to {provider} timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },

    #[error("Request to {provider} failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },
}

/// Strategy decision errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Failed to parse JSON from LLM response: {reason}\nContent: {raw}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Strategy generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Document store errors. Never escape the context repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Failed to read document {name}: {reason}")]
    ReadFailed { name: String, reason: String },

    #[error("Document {name} is not valid UTF-8")]
    InvalidEncoding { name: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all surco errors.
#[derive(Debug, Clone, Error)]
pub enum SurcoError {
    #[error("Rate limited: {0}")]
    RateLimited(#[from] RateLimitError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for surco operations.
pub type SurcoResult<T> = Result<T, SurcoError>;

// =============================================================================
// TESTS
// =============================================================================
