//! Per-user message rate filter.
//!
//! Only messages admitted here reach the `ActivityAccumulator`. A user may post
//! `MESSAGE_LIMIT` messages within any `SPAM_WINDOW`; further messages in the window are
//! not credited. Rejected messages still count toward the window, so a user who keeps
//! spamming stays filtered until they slow down.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

/// Messages a user may post per window before the filter drops them.
pub const MESSAGE_LIMIT: usize = 4;
/// Length of the rate window.
pub const SPAM_WINDOW: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct SpamFilter {
    limit: usize,
    window: Duration,
    recent: Arc<Mutex<HashMap<u64, VecDeque<Instant>>>>,
}

impl SpamFilter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            recent: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records a message and reports whether it should be credited.
    pub fn admit(&self, user_id: u64, now: Instant) -> bool {
        let mut recent = self.lock();
        let timestamps = recent.entry(user_id).or_default();

        while timestamps
            .front()
            .is_some_and(|ts| now.saturating_duration_since(*ts) >= self.window)
        {
            timestamps.pop_front();
        }

        timestamps.push_back(now);
        timestamps.len() <= self.limit
    }

    /// Drops timestamps older than the window and forgets idle users.
    ///
    /// # Returns
    /// - `usize` - Number of users forgotten
    pub fn prune(&self, now: Instant) -> usize {
        let mut recent = self.lock();
        let before = recent.len();

        recent.retain(|_, timestamps| {
            timestamps.retain(|ts| now.saturating_duration_since(*ts) < self.window);
            !timestamps.is_empty()
        });

        before - recent.len()
    }

    /// Number of users with timestamps inside the current window.
    pub fn tracked_users(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, VecDeque<Instant>>> {
        self.recent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self::new(MESSAGE_LIMIT, SPAM_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_limit_within_window() {
        let filter = SpamFilter::default();
        let start = Instant::now();

        for i in 0..MESSAGE_LIMIT {
            assert!(filter.admit(1, start + Duration::from_millis(i as u64 * 100)));
        }
        assert!(!filter.admit(1, start + Duration::from_millis(500)));
    }

    #[test]
    fn window_slides() {
        let filter = SpamFilter::new(2, Duration::from_secs(5));
        let start = Instant::now();

        assert!(filter.admit(1, start));
        assert!(filter.admit(1, start + Duration::from_secs(1)));
        assert!(!filter.admit(1, start + Duration::from_secs(2)));
        // the first two have left the window; the rejected one has not
        assert!(filter.admit(1, start + Duration::from_secs(6)));
    }

    #[test]
    fn users_are_limited_independently() {
        let filter = SpamFilter::new(1, Duration::from_secs(5));
        let now = Instant::now();

        assert!(filter.admit(1, now));
        assert!(filter.admit(2, now));
        assert!(!filter.admit(1, now));
    }

    #[test]
    fn prune_forgets_idle_users() {
        let filter = SpamFilter::new(4, Duration::from_secs(5));
        let start = Instant::now();

        filter.admit(1, start);
        filter.admit(2, start + Duration::from_secs(4));

        assert_eq!(filter.prune(start + Duration::from_secs(6)), 1);
        assert_eq!(filter.tracked_users(), 1);
    }
}
