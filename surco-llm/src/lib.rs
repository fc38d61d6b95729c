//! surco LLM - Text Generation Collaborator
//!
//! Provider-agnostic trait for the one LLM call the strategy engine makes:
//! prompt in, text out. Concrete network clients are supplied by the host
//! application; this crate ships only usage accounting and scripted
//! generators for tests and offline runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surco_core::LlmError;

pub mod mock;
pub mod usage;

pub use mock::{FailingGenerator, ScriptedGenerator, StaticGenerator};
pub use usage::{UsageSnapshot, UsageTracker};

// ============================================================================
// GENERATION REQUEST
// ============================================================================

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier passed through to the provider
    pub model: String,
    pub prompt: String,
    /// Upper bound on output tokens
    pub max_tokens: u32,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: 512,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Rough token estimate for logging (4 characters per token).
    pub fn estimated_prompt_tokens(&self) -> usize {
        self.prompt.chars().count() / 4
    }
}

// ============================================================================
// TEXT GENERATOR TRAIT
// ============================================================================

/// Trait for text generation providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// struct AnthropicGenerator { /* ... */ }
///
/// #[async_trait]
/// impl TextGenerator for AnthropicGenerator {
///     async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
///         // Call the Messages API
///     }
///     fn provider(&self) -> &str { "anthropic" }
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the request.
    ///
    /// # Returns
    /// * `Ok(String)` - The full response text
    /// * `Err(LlmError)` - Provider unavailable, timed out or rejected the request
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;

    /// Provider name used in logs and errors.
    fn provider(&self) -> &str;
}
