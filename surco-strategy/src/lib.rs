//! surco Strategy - Content Strategy Decisions
//!
//! Turns an identified topic into post type, tone, channel and product-search
//! parameters under day-of-week business rules.

pub mod engine;
pub mod parse;
pub mod policy;
pub mod prompt;

pub use engine::{
    apply_hard_rules, StrategyEngine, StrategyEngineConfig, DEFAULT_STRATEGY_MAX_TOKENS,
    DEFAULT_STRATEGY_MODEL, DEFAULT_STRATEGY_TEMPERATURE,
};
pub use parse::{parse_strategy, strip_code_fence};
pub use policy::{DayPolicy, DAY_POLICIES};
pub use prompt::{build_prompt, MAX_RECENT_CHANNELS};
