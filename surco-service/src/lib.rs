//! surco Service - Post Planning Facade
//!
//! Wires admission control, the strategy engine and the context repository
//! into one injectable service value.

pub mod config;
pub mod planner;
pub mod telemetry;

pub use config::{LogFormat, ServiceConfig, DEFAULT_DOCS_DIR};
pub use planner::{PlanRequest, PlannedPost, SocialPlanner, SocialPlannerBuilder};
pub use telemetry::{init_tracing, DEFAULT_LOG_DIRECTIVE};
