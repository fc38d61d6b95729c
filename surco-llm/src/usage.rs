//! Usage accounting for generator calls.
//! Thread-safe via atomic operations.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub invocations: u64,
    pub failures: u64,
    pub prompt_chars: u64,
    pub response_chars: u64,
}

/// Counts calls and characters sent to and received from a generator.
#[derive(Default)]
pub struct UsageTracker {
    invocations: AtomicU64,
    failures: AtomicU64,
    prompt_chars: AtomicU64,
    response_chars: AtomicU64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful call.
    ///
    /// # Arguments
    /// * `prompt_chars` - Characters in the prompt
    /// * `response_chars` - Characters in the response
    pub fn record_success(&self, prompt_chars: usize, response_chars: usize) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        self.prompt_chars
            .fetch_add(prompt_chars as u64, Ordering::Relaxed);
        self.response_chars
            .fetch_add(response_chars as u64, Ordering::Relaxed);
    }

    /// Record a failed call. The prompt still counts as sent.
    pub fn record_failure(&self, prompt_chars: usize) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.prompt_chars
            .fetch_add(prompt_chars as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            invocations: self.invocations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            prompt_chars: self.prompt_chars.load(Ordering::Relaxed),
            response_chars: self.response_chars.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.invocations.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.prompt_chars.store(0, Ordering::Relaxed);
        self.response_chars.store(0, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("UsageTracker")
            .field("invocations", &snapshot.invocations)
            .field("failures", &snapshot.failures)
            .field("prompt_chars", &snapshot.prompt_chars)
            .field("response_chars", &snapshot.response_chars)
            .finish()
    }
}
