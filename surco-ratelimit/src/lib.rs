//! surco Rate Limit - Sliding-Window Admission Control
//!
//! Per-(user, endpoint) quotas evaluated over a trailing window. History is
//! process-local: separate server instances enforce limits independently.

pub mod config;
pub mod limiter;
pub mod store;

pub use config::{
    QuotaDiscipline, RateWindow, RateWindowConfig, GENERATE_ENDPOINT, HOUSEKEEPING_WINDOW_SECS,
    MAX_WINDOW_SECS, SAVE_ENDPOINT,
};
pub use limiter::{Admission, RateLimiter};
pub use store::{RecentWindow, RequestEvent, WindowStore};
