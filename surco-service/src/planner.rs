//! Social Planner
//!
//! Owns every piece of shared state (admission history, context caches,
//! usage counters) behind one explicitly constructed value. Drop it to tear
//! the state down; build a fresh one per test.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surco_context::{ContextRepository, DocumentStore, FsDocumentStore};
use surco_core::{
    special_date, theme_for_date, ContentStrategy, LlmError, SpecialDate, SurcoResult,
    Timestamp, TopicStrategy, WeekdayTheme,
};
use surco_llm::{TextGenerator, UsageTracker};
use surco_ratelimit::{QuotaDiscipline, RateLimiter, GENERATE_ENDPOINT, SAVE_ENDPOINT};
use surco_strategy::StrategyEngine;
use uuid::Uuid;

use crate::config::ServiceConfig;

// ============================================================================
// REQUEST / RESPONSE
// ============================================================================

/// Input for one planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub topic: TopicStrategy,
    /// Publication date; selects the weekday theme and the context month
    pub date: NaiveDate,
    /// Explicit theme, overriding the calendar
    #[serde(default)]
    pub theme: Option<WeekdayTheme>,
    /// Channels used recently, most recent first
    #[serde(default)]
    pub recent_channels: Vec<String>,
}

impl PlanRequest {
    pub fn new(topic: TopicStrategy, date: NaiveDate) -> Self {
        Self {
            topic,
            date,
            theme: None,
            recent_channels: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: WeekdayTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_recent_channels(mut self, channels: Vec<String>) -> Self {
        self.recent_channels = channels;
        self
    }
}

/// Everything downstream generation needs for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPost {
    /// Time-sortable identifier
    pub plan_id: Uuid,
    pub created_at: Timestamp,
    pub strategy: ContentStrategy,
    pub theme: WeekdayTheme,
    /// Month summary of the sector documents
    pub context: String,
    pub special_date: Option<SpecialDate>,
}

// ============================================================================
// PLANNER
// ============================================================================

pub struct SocialPlanner {
    limiter: Arc<RateLimiter>,
    context: Arc<ContextRepository>,
    engine: StrategyEngine,
}

impl SocialPlanner {
    pub fn builder(config: ServiceConfig) -> SocialPlannerBuilder {
        SocialPlannerBuilder::new(config)
    }

    /// Assemble a planner from already-built components.
    pub fn from_parts(
        limiter: Arc<RateLimiter>,
        context: Arc<ContextRepository>,
        engine: StrategyEngine,
    ) -> Self {
        Self {
            limiter,
            context,
            engine,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn context(&self) -> &ContextRepository {
        &self.context
    }

    pub fn engine(&self) -> &StrategyEngine {
        &self.engine
    }

    pub fn usage(&self) -> &UsageTracker {
        self.engine.usage()
    }

    /// Plan one post at the current wall-clock time.
    pub async fn plan(&self, user_id: &str, request: PlanRequest) -> SurcoResult<PlannedPost> {
        self.plan_at(user_id, request, Utc::now()).await
    }

    /// Plan one post: admit, resolve the theme, decide the strategy and
    /// attach the month's context.
    ///
    /// # Errors
    /// * `SurcoError::RateLimited` - The user is over the /generate quota
    /// * `SurcoError::Strategy` - Generation failed or returned garbage
    pub async fn plan_at(
        &self,
        user_id: &str,
        request: PlanRequest,
        now: Timestamp,
    ) -> SurcoResult<PlannedPost> {
        self.limiter
            .check_and_admit_at(user_id, GENERATE_ENDPOINT, now)
            .into_result(GENERATE_ENDPOINT)?;

        let PlanRequest {
            topic,
            date,
            theme,
            recent_channels,
        } = request;
        let theme = theme.unwrap_or_else(|| theme_for_date(date));

        let strategy = self.engine.decide(&topic, &theme, &recent_channels).await?;
        let context = self.context.load_context(date.month(), true);

        if self.records_on_success(GENERATE_ENDPOINT) {
            self.limiter.record_at(user_id, GENERATE_ENDPOINT, now);
        }

        let planned = PlannedPost {
            plan_id: Uuid::now_v7(),
            created_at: now,
            strategy,
            theme,
            context,
            special_date: special_date(date),
        };

        tracing::info!(
            user_id,
            plan_id = %planned.plan_id,
            day_name = %planned.theme.day_name,
            channel = %planned.strategy.channel,
            special_date = ?planned.special_date.as_ref().map(|d| d.name.as_str()),
            context_length = planned.context.len(),
            "Post planned"
        );
        Ok(planned)
    }

    /// Admission check for saving a post.
    pub fn check_save(&self, user_id: &str) -> SurcoResult<()> {
        self.limiter
            .check_and_admit(user_id, SAVE_ENDPOINT)
            .into_result(SAVE_ENDPOINT)?;
        Ok(())
    }

    /// Record a completed save.
    ///
    /// Returns `false` when /save already counts on admission.
    pub fn record_save(&self, user_id: &str) -> bool {
        self.limiter.record(user_id, SAVE_ENDPOINT)
    }

    fn records_on_success(&self, endpoint: &str) -> bool {
        self.limiter
            .config()
            .get(endpoint)
            .is_some_and(|w| w.discipline == QuotaDiscipline::RecordOnSuccess)
    }
}

impl std::fmt::Debug for SocialPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialPlanner")
            .field("limiter", &self.limiter)
            .field("context", &self.context)
            .field("engine", &self.engine)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`SocialPlanner`] from configuration.
///
/// A generator is required; the document store defaults to the filesystem
/// under `config.docs_dir`.
pub struct SocialPlannerBuilder {
    config: ServiceConfig,
    generator: Option<Arc<dyn TextGenerator>>,
    documents: Option<Arc<dyn DocumentStore>>,
    usage: Option<Arc<UsageTracker>>,
}

impl SocialPlannerBuilder {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            generator: None,
            documents: None,
            usage: None,
        }
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn documents(mut self, documents: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn usage_tracker(mut self, usage: Arc<UsageTracker>) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Validate the configuration and assemble the planner.
    ///
    /// # Errors
    /// * `SurcoError::Config` - The configuration is invalid
    /// * `SurcoError::Llm(ProviderNotConfigured)` - No generator was supplied
    pub fn build(self) -> SurcoResult<SocialPlanner> {
        self.config.validate()?;
        let generator = self.generator.ok_or(LlmError::ProviderNotConfigured)?;

        let documents = self.documents.unwrap_or_else(|| {
            Arc::new(FsDocumentStore::new(self.config.docs_dir.clone())) as Arc<dyn DocumentStore>
        });

        let mut engine = StrategyEngine::with_config(generator, self.config.strategy.clone());
        if let Some(usage) = self.usage {
            engine = engine.with_usage_tracker(usage);
        }

        tracing::info!(
            docs_dir = %self.config.docs_dir.display(),
            model = %self.config.strategy.model,
            metered_endpoints = self.config.rate_limits.len(),
            "Social planner built"
        );

        Ok(SocialPlanner::from_parts(
            Arc::new(RateLimiter::new(self.config.rate_limits)),
            Arc::new(ContextRepository::with_config(documents, self.config.context)),
            engine,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surco_core::SurcoError;
    use surco_llm::StaticGenerator;
    use surco_test_utils::fixtures;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_requires_generator() {
        let err = SocialPlanner::builder(ServiceConfig::default())
            .build()
            .unwrap_err();
        assert!(matches!(err, SurcoError::Llm(LlmError::ProviderNotConfigured)));
    }

    #[test]
    fn test_builder_validates_config() {
        let mut config = ServiceConfig::default();
        config.strategy.max_tokens = 0;
        let err = SocialPlanner::builder(config)
            .generator(Arc::new(StaticGenerator::new("{}")))
            .build()
            .unwrap_err();
        assert!(matches!(err, SurcoError::Config(_)));
    }

    #[tokio::test]
    async fn test_plan_reads_documents_from_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("durango-ganaderia.md"),
            fixtures::GANADERIA_MD,
        )
        .unwrap();

        let config = ServiceConfig {
            docs_dir: dir.path().to_path_buf(),
            ..ServiceConfig::default()
        };
        let planner = SocialPlanner::builder(config)
            .generator(Arc::new(StaticGenerator::new(fixtures::strategy_json(false))))
            .build()
            .unwrap();

        let planned = planner
            .plan("user-1", PlanRequest::new(fixtures::topic(), date(2025, 12, 3)))
            .await
            .unwrap();
        assert_eq!(
            planned.context,
            "GANADERÍA DURANGO:\n## Diciembre\nAlimentación suplementaria y refugios...."
        );
        assert_eq!(planned.theme.day_name, "Wednesday");
    }

    #[test]
    fn test_plan_request_deserializes_with_defaults() {
        let json = r#"{
            "topic": {"topic":"t","problem_identified":"p","angle":"a","target_audience":"plant"},
            "date": "2025-06-15"
        }"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert!(request.theme.is_none());
        assert!(request.recent_channels.is_empty());
    }
}
