//! Strategy Decision Engine
//!
//! One request runs BuildPrompt -> Invoke -> ParseResponse -> ApplyHardRules.
//! Any failing step fails the request; nothing is retried here.

use crate::parse::parse_strategy;
use crate::policy::DayPolicy;
use crate::prompt::build_prompt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surco_core::{redact_secrets, ContentStrategy, StrategyError, TopicStrategy, WeekdayTheme};
use surco_llm::{GenerationRequest, TextGenerator, UsageTracker};

pub const DEFAULT_STRATEGY_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_STRATEGY_MAX_TOKENS: u32 = 512;
pub const DEFAULT_STRATEGY_TEMPERATURE: f32 = 0.7;

/// Fixed generation parameters for strategy decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyEngineConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for StrategyEngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_STRATEGY_MODEL.to_string(),
            max_tokens: DEFAULT_STRATEGY_MAX_TOKENS,
            temperature: DEFAULT_STRATEGY_TEMPERATURE,
        }
    }
}

/// Overrides the model's answer where the day's policy is binding.
pub fn apply_hard_rules(mut strategy: ContentStrategy, policy: DayPolicy) -> ContentStrategy {
    if policy.forces_search() && !strategy.search_needed {
        tracing::debug!(policy = policy.as_str(), "Forcing product search");
        strategy.search_needed = true;
    }
    strategy
}

pub struct StrategyEngine {
    generator: Arc<dyn TextGenerator>,
    config: StrategyEngineConfig,
    usage: Arc<UsageTracker>,
}

impl StrategyEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_config(generator, StrategyEngineConfig::default())
    }

    pub fn with_config(generator: Arc<dyn TextGenerator>, config: StrategyEngineConfig) -> Self {
        Self {
            generator,
            config,
            usage: Arc::new(UsageTracker::new()),
        }
    }

    /// Share a usage tracker with other components.
    pub fn with_usage_tracker(mut self, usage: Arc<UsageTracker>) -> Self {
        self.usage = usage;
        self
    }

    pub fn config(&self) -> &StrategyEngineConfig {
        &self.config
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Decide post type, tone, channel and product search for a topic.
    ///
    /// # Arguments
    /// * `topic` - Output of the topic phase
    /// * `theme` - The day's editorial plan
    /// * `recent_channels` - Channels used recently, most recent first
    ///
    /// # Errors
    /// * `StrategyError::Generation` - The generator failed
    /// * `StrategyError::MalformedResponse` - The answer was not a valid strategy
    pub async fn decide(
        &self,
        topic: &TopicStrategy,
        theme: &WeekdayTheme,
        recent_channels: &[String],
    ) -> Result<ContentStrategy, StrategyError> {
        let policy = DayPolicy::for_day(&theme.day_name);
        let prompt = build_prompt(topic, theme, recent_channels);
        let prompt_chars = prompt.chars().count();

        let request = GenerationRequest::new(self.config.model.clone(), prompt)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        tracing::info!(
            day_name = %theme.day_name,
            policy = policy.as_str(),
            prompt_length = prompt_chars,
            prompt_tokens_estimate = request.estimated_prompt_tokens(),
            "Strategy prompt built"
        );
        tracing::debug!(prompt = %redact_secrets(&request.prompt), "Strategy prompt");

        let response = match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                self.usage.record_failure(prompt_chars);
                tracing::error!(
                    provider = self.generator.provider(),
                    error = %e,
                    "Strategy generation failed"
                );
                return Err(e.into());
            }
        };
        self.usage
            .record_success(prompt_chars, response.chars().count());
        tracing::debug!(
            response_length = response.len(),
            response = %redact_secrets(&response),
            "Strategy response received"
        );

        let strategy = parse_strategy(&response).map_err(|e| {
            tracing::error!(error = %redact_secrets(&e.to_string()), "Strategy response rejected");
            e
        })?;
        let strategy = apply_hard_rules(strategy, policy);

        tracing::info!(
            post_type = %strategy.post_type,
            tone = %strategy.tone,
            channel = %strategy.channel,
            search_needed = strategy.search_needed,
            preferred_category = ?strategy.preferred_category,
            search_keywords = ?strategy.search_keywords,
            "Strategy decided"
        );
        Ok(strategy)
    }
}

impl std::fmt::Debug for StrategyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyEngine")
            .field("provider", &self.generator.provider())
            .field("config", &self.config)
            .field("usage", &self.usage)
            .finish()
    }
}
