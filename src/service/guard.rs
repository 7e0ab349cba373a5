//! Concurrency guard and autopay kill switch.
//!
//! `ClaimGuard` admits at most one in-flight claim per user. Admission hands out a
//! `ClaimPermit` that releases the user when dropped, so every exit path of the
//! orchestrator (success, error outcome, timeout, panic unwinding) frees the slot.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

/// Tracks which users currently have a claim in flight.
#[derive(Clone, Default)]
pub struct ClaimGuard {
    in_flight: Arc<Mutex<HashSet<u64>>>,
}

impl ClaimGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits the user unless a claim for them is already in flight.
    ///
    /// # Returns
    /// - `Some(ClaimPermit)` - Admitted; the user stays busy until the permit is dropped
    /// - `None` - Another claim for this user is in flight
    pub fn try_admit(&self, user_id: u64) -> Option<ClaimPermit> {
        if self.lock().insert(user_id) {
            Some(ClaimPermit {
                guard: self.clone(),
                user_id,
            })
        } else {
            None
        }
    }

    /// Frees the user's slot. Releasing a user that is not in flight is a no-op.
    pub fn release(&self, user_id: u64) {
        self.lock().remove(&user_id);
    }

    /// Whether a claim for the user is currently in flight.
    #[cfg(test)]
    pub(crate) fn is_in_flight(&self, user_id: u64) -> bool {
        self.lock().contains(&user_id)
    }

    // the set is always left consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, HashSet<u64>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Scoped admission for one user; releases the user on drop.
pub struct ClaimPermit {
    guard: ClaimGuard,
    user_id: u64,
}

impl ClaimPermit {
    #[cfg(test)]
    pub(crate) fn user_id(&self) -> u64 {
        self.user_id
    }
}

impl Drop for ClaimPermit {
    fn drop(&mut self) {
        self.guard.release(self.user_id);
    }
}

/// Process-wide autopay switch, read at the start of every claim.
///
/// Not persisted: the initial value comes from configuration on every start.
#[derive(Clone)]
pub struct AutopaySwitch {
    enabled: Arc<AtomicBool>,
}

impl AutopaySwitch {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Sets the switch and returns the previous value.
    pub fn set(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::SeqCst)
    }
}
