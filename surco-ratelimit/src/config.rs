//! Rate window configuration
//!
//! Static, process-wide quotas keyed by endpoint path. Endpoints without an
//! entry are unmetered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surco_core::ConfigError;

/// Endpoint path for post generation.
pub const GENERATE_ENDPOINT: &str = "/generate";

/// Endpoint path for saving a generated post.
pub const SAVE_ENDPOINT: &str = "/save";

/// Pruning floor used by explicit `record` calls, independent of any window.
pub const HOUSEKEEPING_WINDOW_SECS: i64 = 3600;

/// Widest accepted window: one leap year.
pub const MAX_WINDOW_SECS: u64 = 366 * 24 * 3600;

/// Which call consumes quota for an endpoint.
///
/// Using both the admission check and the explicit record for the same
/// request would count it twice, so every endpoint picks exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuotaDiscipline {
    /// The admission check records the attempt when it admits it.
    #[default]
    RecordOnAdmit,
    /// The admission check is read-only; callers record after success.
    RecordOnSuccess,
}

/// Quota for a single endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    pub max_requests: u32,
    pub window_seconds: u64,
    #[serde(default)]
    pub discipline: QuotaDiscipline,
}

impl RateWindow {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
            discipline: QuotaDiscipline::default(),
        }
    }

    pub fn with_discipline(mut self, discipline: QuotaDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Window width in whole minutes, as shown to users.
    pub fn window_minutes(&self) -> u64 {
        self.window_seconds / 60
    }
}

/// Mapping from endpoint to quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateWindowConfig {
    windows: HashMap<String, RateWindow>,
}

impl Default for RateWindowConfig {
    fn default() -> Self {
        Self::empty()
            .with_window(GENERATE_ENDPOINT, RateWindow::new(20, 3600))
            .with_window(SAVE_ENDPOINT, RateWindow::new(100, 3600))
    }
}

impl RateWindowConfig {
    /// A configuration with no metered endpoints.
    pub fn empty() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// Add or replace the quota for an endpoint.
    pub fn with_window(mut self, endpoint: impl Into<String>, window: RateWindow) -> Self {
        self.windows.insert(endpoint.into(), window);
        self
    }

    /// Quota for an endpoint, or `None` when it is unmetered.
    pub fn get(&self, endpoint: &str) -> Option<&RateWindow> {
        self.windows.get(endpoint)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.windows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Reject zero quotas, zero-width windows and windows wider than
    /// [`MAX_WINDOW_SECS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (endpoint, window) in &self.windows {
            if window.max_requests == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("rate_limit[{}].max_requests", endpoint),
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            if window.window_seconds == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("rate_limit[{}].window_seconds", endpoint),
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            if window.window_seconds > MAX_WINDOW_SECS {
                return Err(ConfigError::InvalidValue {
                    field: format!("rate_limit[{}].window_seconds", endpoint),
                    value: window.window_seconds.to_string(),
                    reason: format!("must be at most {}", MAX_WINDOW_SECS),
                });
            }
        }
        Ok(())
    }
}
