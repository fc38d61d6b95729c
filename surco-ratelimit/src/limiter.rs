//! Per-(user, endpoint) admission decisions.

use crate::config::{QuotaDiscipline, RateWindow, RateWindowConfig, HOUSEKEEPING_WINDOW_SECS};
use crate::store::{RecentWindow, WindowStore};
use chrono::{DateTime, Duration, Utc};
use surco_core::{RateLimitError, Timestamp};

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected {
        /// Human-readable explanation including the wait time
        message: String,
        retry_after_secs: u64,
    },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Retry message, present only on rejection.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Rejected { message, .. } => Some(message),
        }
    }

    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Allowed => None,
            Self::Rejected {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
        }
    }

    /// Convert a rejection into a typed error for the given endpoint.
    pub fn into_result(self, endpoint: &str) -> Result<(), RateLimitError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Rejected {
                message,
                retry_after_secs,
            } => Err(RateLimitError::Exceeded {
                endpoint: endpoint.to_string(),
                message,
                retry_after_secs,
            }),
        }
    }
}

/// Sliding-window rate limiter over a [`WindowStore`].
///
/// Never fails: unmetered endpoints are always admitted.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateWindowConfig,
    store: WindowStore,
}

impl RateLimiter {
    pub fn new(config: RateWindowConfig) -> Self {
        Self {
            config,
            store: WindowStore::new(),
        }
    }

    pub fn config(&self) -> &RateWindowConfig {
        &self.config
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    /// Admission check at the current wall-clock time.
    pub fn check_and_admit(&self, user: &str, endpoint: &str) -> Admission {
        self.check_and_admit_at(user, endpoint, Utc::now())
    }

    /// Admission check at `now`.
    ///
    /// For `RecordOnAdmit` endpoints an admitted check is itself recorded and
    /// counts toward the quota even if the downstream work later fails.
    pub fn check_and_admit_at(&self, user: &str, endpoint: &str, now: Timestamp) -> Admission {
        let Some(window) = self.config.get(endpoint) else {
            return Admission::Allowed;
        };

        let start = window_start(window, now);
        let append = window.discipline == QuotaDiscipline::RecordOnAdmit;

        match self.store.try_admit(
            user,
            endpoint,
            now,
            start,
            window.max_requests as usize,
            append,
        ) {
            Ok(_) => Admission::Allowed,
            Err(recent) => {
                let retry_after_secs = retry_after(window, &recent, now);
                tracing::warn!(
                    user_id = user,
                    endpoint,
                    recent = recent.count,
                    retry_after_secs,
                    "Rate limit exceeded"
                );
                Admission::Rejected {
                    message: format!(
                        "Rate limit exceeded. Maximum {} requests per {} minutes. \
                         Please wait {} seconds before trying again.",
                        window.max_requests,
                        window.window_minutes(),
                        retry_after_secs
                    ),
                    retry_after_secs,
                }
            }
        }
    }

    /// Record a completed request at the current wall-clock time.
    pub fn record(&self, user: &str, endpoint: &str) -> bool {
        self.record_at(user, endpoint, Utc::now())
    }

    /// Record a completed request at `now`, pruning anything older than one
    /// hour regardless of the endpoint's window.
    ///
    /// Returns `false` without recording when the endpoint already records on
    /// admission, so a request is never counted twice.
    pub fn record_at(&self, user: &str, endpoint: &str, now: Timestamp) -> bool {
        if let Some(window) = self.config.get(endpoint) {
            if window.discipline == QuotaDiscipline::RecordOnAdmit {
                tracing::debug!(
                    user_id = user,
                    endpoint,
                    "Skipping explicit record: endpoint records on admission"
                );
                return false;
            }
        }

        let floor = now - Duration::seconds(HOUSEKEEPING_WINDOW_SECS);
        self.store.record(user, endpoint, now, floor);
        true
    }

    /// Requests counted for (user, endpoint) in its window ending at `now`.
    pub fn usage_at(&self, user: &str, endpoint: &str, now: Timestamp) -> usize {
        match self.config.get(endpoint) {
            Some(window) => {
                self.store
                    .count_recent(user, endpoint, window_start(window, now))
            }
            None => 0,
        }
    }
}

/// Window width, or `None` when it exceeds what a time delta can hold.
fn window_width(window: &RateWindow) -> Option<Duration> {
    i64::try_from(window.window_seconds)
        .ok()
        .and_then(Duration::try_seconds)
}

/// Earliest instant counted by the window ending at `now`.
///
/// A window reaching past the representable range counts everything.
fn window_start(window: &RateWindow, now: Timestamp) -> Timestamp {
    window_width(window)
        .and_then(|width| now.checked_sub_signed(width))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Seconds until the oldest in-window event leaves the window, rounded up and
/// never below one.
fn retry_after(window: &RateWindow, recent: &RecentWindow, now: Timestamp) -> u64 {
    // Only a zero quota rejects an empty window, and nothing will ever expire
    // to admit the next attempt.
    let Some(oldest) = recent.oldest else {
        return window.window_seconds.max(1);
    };

    let Some(expires) = window_width(window).and_then(|width| oldest.checked_add_signed(width))
    else {
        return window.window_seconds;
    };

    let remaining = expires - now;
    let whole = remaining.num_seconds();
    let ceil = if remaining > Duration::seconds(whole) {
        whole + 1
    } else {
        whole
    };
    ceil.max(1) as u64
}


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::config::RateWindow;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The (max + 1)-th attempt inside one window is rejected, and the
        /// retry-after matches the oldest admitted attempt.
        #[test]
        fn prop_attempt_after_max_is_rejected(
            max in 1u32..40,
            window_secs in 60u64..7200,
            gaps in proptest::collection::vec(0i64..5, 40),
        ) {
            let limiter = RateLimiter::new(
                RateWindowConfig::empty().with_window("/generate", RateWindow::new(max, window_secs)),
            );

            let mut now = 0i64;
            for gap in gaps.iter().take(max as usize) {
                now += gap;
                prop_assert!(limiter.check_and_admit_at("u", "/generate", t(now)).is_allowed());
            }
            let first = gaps[0];
            prop_assume!(now + 1 - first < window_secs as i64);

            let rejected = limiter.check_and_admit_at("u", "/generate", t(now + 1));
            prop_assert!(!rejected.is_allowed());

            let expected = (first + window_secs as i64 - (now + 1)).max(1) as u64;
            prop_assert_eq!(rejected.retry_after_secs(), Some(expected));
            prop_assert!(expected > 0);
        }

        /// The stored count for a (user, endpoint) never exceeds the quota.
        #[test]
        fn prop_window_count_never_exceeds_max(
            max in 1u32..10,
            offsets in proptest::collection::vec(0i64..600, 1..80),
        ) {
            let limiter = RateLimiter::new(
                RateWindowConfig::empty().with_window("/generate", RateWindow::new(max, 300)),
            );
            let mut sorted = offsets.clone();
            sorted.sort_unstable();

            for offset in sorted {
                let admission = limiter.check_and_admit_at("u", "/generate", t(offset));
                let used = limiter.usage_at("u", "/generate", t(offset));
                prop_assert!(used <= max as usize);
                if admission.is_allowed() {
                    prop_assert!(used >= 1);
                }
            }
        }

        /// Unmetered endpoints are admitted for any volume.
        #[test]
        fn prop_unmetered_always_allowed(
            user in "[a-z0-9]{1,12}",
            calls in 1usize..200,
        ) {
            let limiter = RateLimiter::new(RateWindowConfig::default());
            for i in 0..calls {
                let admission = limiter.check_and_admit_at(&user, "/unmetered", t(i as i64));
                prop_assert!(admission.is_allowed());
                prop_assert!(admission.message().is_none());
            }
        }
    }
}
