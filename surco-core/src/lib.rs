//! surco Core - Shared Types
//!
//! Data structures shared by the admission, context and strategy crates.
//! This crate contains no I/O and no shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod error;
pub mod redact;

pub use calendar::{
    special_date, theme_for_date, theme_for_day, weekday_themes, ProducerSegment,
    SpecialDate, SpecialDateKind,
};
pub use error::{
    ConfigError, DocumentError, LlmError, RateLimitError, StrategyError, SurcoError,
    SurcoResult,
};
pub use redact::redact_secrets;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// TOPIC PAYLOAD
// ============================================================================

/// Output of the upstream topic phase. Consumed by the strategy engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStrategy {
    /// Short title, usually "Error -> Damage -> Solution"
    pub topic: String,
    pub problem_identified: String,
    /// Working angle such as "riego", "fertilización" or "plagas"
    pub angle: String,
    /// "high", "medium" or "low"
    #[serde(default)]
    pub urgency_level: String,
    /// "plant", "animal", "forestry" or "general"
    pub target_audience: String,
}

// ============================================================================
// WEEKDAY THEME
// ============================================================================

/// How a day of the week treats product promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStrategy {
    /// Every post must feature a product
    Required,
    /// Products only when the topic calls for one
    #[default]
    Flexible,
    /// No products
    EducationalOnly,
}

/// Editorial plan for one day of the week.
///
/// Only `day_name`, `theme` and `recommended_post_types` are needed by the
/// strategy engine; the rest is carried for downstream phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayTheme {
    /// English day name, e.g. "Tuesday"
    pub day_name: String,
    pub theme: String,
    /// Ordered by preference
    pub recommended_post_types: Vec<String>,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub primary_tone: String,
    #[serde(default)]
    pub alternative_tones: Vec<String>,
    #[serde(default)]
    pub product_strategy: ProductStrategy,
    /// Producer segment for days that rotate their audience
    #[serde(default)]
    pub sector_rotation: Option<ProducerSegment>,
}

impl WeekdayTheme {
    /// Create a theme with only the fields the strategy engine reads.
    pub fn new(
        day_name: impl Into<String>,
        theme: impl Into<String>,
        recommended_post_types: Vec<String>,
    ) -> Self {
        Self {
            day_name: day_name.into(),
            theme: theme.into(),
            recommended_post_types,
            content_type: String::new(),
            primary_tone: String::new(),
            alternative_tones: Vec::new(),
            product_strategy: ProductStrategy::default(),
            sector_rotation: None,
        }
    }
}

// ============================================================================
// CONTENT STRATEGY
// ============================================================================

/// Decisions governing one generated post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStrategy {
    pub post_type: String,
    pub tone: String,
    pub channel: String,
    pub search_needed: bool,
    #[serde(default)]
    pub preferred_category: Option<String>,
    #[serde(default)]
    pub search_keywords: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================
