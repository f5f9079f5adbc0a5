//! Sliding-window rate limiting keyed by action type.
//!
//! Each action key keeps the timestamps of its recently allowed actions, so
//! independent actions (for example `addNote` and `deleteNote`) have
//! independent budgets. Rejected attempts are not recorded.
//!
//! State is process-local: two processes sharing one store each enforce
//! their own budget.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};

/// A budget of `max_actions` per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_actions: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const fn new(max_actions: usize, window: Duration) -> Self {
        Self {
            max_actions,
            window,
        }
    }
}

/// Per-action sliding-window counter.
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    actions: Mutex<HashMap<String, VecDeque<i64>>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            actions: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt of `action` and report whether it fits the budget.
    ///
    /// Timestamps at least `window` old are discarded first. If the remaining
    /// count already reaches `max_actions` the attempt is rejected and not
    /// recorded.
    pub fn is_allowed(&self, action: &str, max_actions: usize, window: Duration) -> bool {
        let now = self.clock.now_millis();
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);

        let mut actions = self.actions.lock().unwrap_or_else(|e| e.into_inner());
        let times = actions.entry(action.to_string()).or_default();
        while let Some(&oldest) = times.front() {
            if now.saturating_sub(oldest) >= window_ms {
                times.pop_front();
            } else {
                break;
            }
        }

        if times.len() >= max_actions {
            tracing::debug!(action, max_actions, "rate limit reached");
            return false;
        }

        times.push_back(now);
        true
    }

    /// Convenience wrapper over [`is_allowed`](Self::is_allowed).
    pub fn check(&self, action: &str, limit: RateLimit) -> bool {
        self.is_allowed(action, limit.max_actions, limit.window)
    }

    /// Forget all tracked actions.
    pub fn reset(&self) {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn limiter() -> (Arc<ManualClock>, RateLimiter) {
        let clock = Arc::new(ManualClock::at_millis(1_000_000));
        let limiter = RateLimiter::new(clock.clone());
        (clock, limiter)
    }

    #[test]
    fn test_allows_up_to_max_then_rejects() {
        let (_clock, limiter) = limiter();
        let window = Duration::from_secs(60);

        for _ in 0..5 {
            assert!(limiter.is_allowed("addNote", 5, window));
        }
        assert!(!limiter.is_allowed("addNote", 5, window));
    }

    #[test]
    fn test_window_elapse_restores_budget() {
        let (clock, limiter) = limiter();
        let window = Duration::from_secs(60);

        for _ in 0..3 {
            assert!(limiter.is_allowed("addNote", 3, window));
        }
        clock.advance(chrono::Duration::milliseconds(59_999));
        assert!(!limiter.is_allowed("addNote", 3, window));

        clock.advance(chrono::Duration::milliseconds(1));
        assert!(limiter.is_allowed("addNote", 3, window));
    }

    #[test]
    fn test_rejected_attempts_are_not_recorded() {
        let (clock, limiter) = limiter();
        let window = Duration::from_millis(100);

        assert!(limiter.is_allowed("a", 1, window));
        clock.advance(chrono::Duration::milliseconds(50));
        assert!(!limiter.is_allowed("a", 1, window));

        // Only the first attempt counts, so 100ms after it the budget is back.
        clock.advance(chrono::Duration::milliseconds(50));
        assert!(limiter.is_allowed("a", 1, window));
    }

    #[test]
    fn test_actions_have_independent_budgets() {
        let (_clock, limiter) = limiter();
        let limit = RateLimit::new(1, Duration::from_secs(1));

        assert!(limiter.check("addNote", limit));
        assert!(!limiter.check("addNote", limit));
        assert!(limiter.check("deleteNote", limit));
    }

    #[test]
    fn test_reset_clears_state() {
        let (_clock, limiter) = limiter();
        let window = Duration::from_secs(60);

        assert!(limiter.is_allowed("addNote", 1, window));
        assert!(!limiter.is_allowed("addNote", 1, window));
        limiter.reset();
        assert!(limiter.is_allowed("addNote", 1, window));
    }

    #[test]
    fn test_zero_budget_rejects_everything() {
        let (_clock, limiter) = limiter();
        assert!(!limiter.is_allowed("addNote", 0, Duration::from_secs(1)));
    }
}
