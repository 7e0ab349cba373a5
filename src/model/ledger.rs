//! Ledger domain model and the activity → points formula.

use crate::{
    error::AppError,
    util::parse::{counter_from_i64, parse_u64_from_string},
};

/// Messages required for one point.
pub const POINTS_THRESHOLD: u64 = 100;
/// Messages required for one bonus grant.
pub const BONUS_THRESHOLD: u64 = 1000;
/// Points granted per bonus threshold reached.
pub const BONUS_POINTS: u64 = 5;
/// Market coins paid out per point unless overridden by configuration.
pub const DEFAULT_EXCHANGE_RATE: u64 = 75_000;

/// Computes the point balance earned by `activity` messages.
///
/// `floor(activity / 100) + 5 * floor(activity / 1000)`
pub fn points_for_activity(activity: u64) -> u64 {
    activity / POINTS_THRESHOLD + BONUS_POINTS * (activity / BONUS_THRESHOLD)
}

/// Smallest activity count whose formula balance is at least `points`.
///
/// Used by the owner `$addpoints` adjustment to keep the activity history consistent
/// with a manually granted balance.
pub fn activity_for_points(points: u64) -> u64 {
    let mut lo = 0u64;
    let mut hi = points.saturating_mul(POINTS_THRESHOLD);

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if points_for_activity(mid) >= points {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}

/// Activity and spendable balance for one Discord user.
///
/// `point_balance` follows `points_for_activity(activity_count)` except after a settled
/// claim, which zeroes the balance while keeping the activity history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Discord ID of the user
    pub user_id: u64,
    /// Qualifying messages observed for the user
    pub activity_count: u64,
    /// Spendable points
    pub point_balance: u64,
}

impl LedgerEntry {
    /// Entry for a user with no recorded activity.
    pub fn empty(user_id: u64) -> Self {
        Self {
            user_id,
            activity_count: 0,
            point_balance: 0,
        }
    }

    /// Returns the entry with a new activity count and the balance re-derived from it.
    pub fn with_activity(self, activity_count: u64) -> Self {
        Self {
            activity_count,
            point_balance: points_for_activity(activity_count),
            ..self
        }
    }

    /// Returns the entry with its balance spent and activity history kept.
    pub fn settled(self) -> Self {
        Self {
            point_balance: 0,
            ..self
        }
    }

    /// Messages still needed before the formula grants the next point.
    pub fn activity_until_next_point(&self) -> u64 {
        POINTS_THRESHOLD - self.activity_count % POINTS_THRESHOLD
    }

    /// Converts an entity model to a ledger entry at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(LedgerEntry)` - The converted entry
    /// - `Err(AppError::InternalErr)` - Stored user id is not numeric or a counter is negative
    pub fn from_entity(entity: entity::user_stats::Model) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;

        Ok(Self {
            user_id,
            activity_count: counter_from_i64(user_id, "messages", entity.messages)?,
            point_balance: counter_from_i64(user_id, "points", entity.points)?,
        })
    }
}
