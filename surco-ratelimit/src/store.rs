//! Per-user request history with time-bounded pruning.
//!
//! Pruning is opportunistic: it happens while recording or counting, never in
//! the background. Each user's history sits behind one DashMap shard lock, so
//! a check-then-append is atomic for that user. A user whose history prunes
//! down to nothing is dropped from the map.

use dashmap::DashMap;
use surco_core::Timestamp;

/// One recorded request. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEvent {
    pub timestamp: Timestamp,
    pub endpoint: String,
}

/// Requests for one (user, endpoint) inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentWindow {
    pub count: usize,
    /// Oldest event still inside the window
    pub oldest: Option<Timestamp>,
}

/// Append-only event log keyed by user identifier.
#[derive(Debug, Default)]
pub struct WindowStore {
    histories: DashMap<String, Vec<RequestEvent>>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, then drop every event of this user older than `floor`.
    pub fn record(&self, user: &str, endpoint: &str, now: Timestamp, floor: Timestamp) {
        {
            let mut history = self.histories.entry(user.to_string()).or_default();
            history.push(RequestEvent {
                timestamp: now,
                endpoint: endpoint.to_string(),
            });
            history.retain(|event| event.timestamp >= floor);
        }
        self.evict_if_empty(user);
    }

    /// Count this user's `endpoint` events at or after `window_start`.
    ///
    /// Stale events for `endpoint` are removed as a side effect.
    pub fn count_recent(&self, user: &str, endpoint: &str, window_start: Timestamp) -> usize {
        self.recent(user, endpoint, window_start).count
    }

    /// Like [`count_recent`](Self::count_recent), also reporting the oldest
    /// event inside the window.
    pub fn recent(&self, user: &str, endpoint: &str, window_start: Timestamp) -> RecentWindow {
        let window = match self.histories.get_mut(user) {
            Some(mut history) => prune_and_measure(&mut history, endpoint, window_start),
            None => RecentWindow {
                count: 0,
                oldest: None,
            },
        };
        self.evict_if_empty(user);
        window
    }

    /// Count, compare against `max_requests` and, when under the limit and
    /// `append` is set, record `now`, all under the user's lock.
    ///
    /// Returns the window as it stood before the attempt: `Ok` when admitted,
    /// `Err` when the limit was already reached.
    pub fn try_admit(
        &self,
        user: &str,
        endpoint: &str,
        now: Timestamp,
        window_start: Timestamp,
        max_requests: usize,
        append: bool,
    ) -> Result<RecentWindow, RecentWindow> {
        let outcome = {
            let mut history = self.histories.entry(user.to_string()).or_default();
            let window = prune_and_measure(&mut history, endpoint, window_start);

            if window.count >= max_requests {
                Err(window)
            } else {
                if append {
                    history.push(RequestEvent {
                        timestamp: now,
                        endpoint: endpoint.to_string(),
                    });
                }
                Ok(window)
            }
        };
        self.evict_if_empty(user);
        outcome
    }

    /// Remove the user's entry if pruning left it empty. Must be called with
    /// no guard on the user's shard held.
    fn evict_if_empty(&self, user: &str) {
        self.histories.remove_if(user, |_, history| history.is_empty());
    }

    /// Number of events currently stored for a user, across endpoints.
    pub fn history_len(&self, user: &str) -> usize {
        self.histories.get(user).map(|h| h.len()).unwrap_or(0)
    }

    /// Copy of a user's stored events.
    pub fn history(&self, user: &str) -> Vec<RequestEvent> {
        self.histories
            .get(user)
            .map(|h| h.value().clone())
            .unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.histories.len()
    }

    /// Drop all recorded history.
    pub fn clear(&self) {
        self.histories.clear();
    }
}

/// Keep other endpoints' events untouched, drop this endpoint's stale ones,
/// and measure what is left for it.
fn prune_and_measure(
    history: &mut Vec<RequestEvent>,
    endpoint: &str,
    window_start: Timestamp,
) -> RecentWindow {
    history.retain(|event| event.endpoint != endpoint || event.timestamp >= window_start);

    let mut count = 0;
    let mut oldest: Option<Timestamp> = None;
    for event in history.iter().filter(|e| e.endpoint == endpoint) {
        count += 1;
        oldest = Some(match oldest {
            Some(current) if current <= event.timestamp => current,
            _ => event.timestamp,
        });
    }
    RecentWindow { count, oldest }
}
