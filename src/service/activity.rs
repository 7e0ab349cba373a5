//! Activity accumulator.
//!
//! Converts already-filtered message activity into point balances. Rate shaping happens
//! upstream in `SpamFilter`; everything here goes through `BalanceStore::update` so the
//! read-increment-write of one event can never interleave with another.

use crate::{
    error::AppError,
    model::ledger::{activity_for_points, LedgerEntry},
    service::balance::BalanceStore,
};

/// Credits message activity and owner adjustments to the ledger.
#[derive(Clone)]
pub struct ActivityAccumulator {
    store: BalanceStore,
}

impl ActivityAccumulator {
    pub fn new(store: BalanceStore) -> Self {
        Self { store }
    }

    /// Records one qualifying message for a user.
    ///
    /// Increments the activity count and re-derives the point balance from it. Note that
    /// this also restores the formula balance of a user whose points were spent by a claim.
    ///
    /// # Returns
    /// - `Ok(LedgerEntry)` - The updated entry
    /// - `Err(AppError)` - Database error; the ledger is unchanged
    pub async fn on_activity(&self, user_id: u64) -> Result<LedgerEntry, AppError> {
        self.add_activity(user_id, 1).await
    }

    /// Adds `amount` messages to a user's activity and re-derives the balance.
    ///
    /// Backs the owner `$addmessages` command.
    pub async fn add_activity(&self, user_id: u64, amount: u64) -> Result<LedgerEntry, AppError> {
        self.store
            .update(user_id, |entry| {
                entry.with_activity(entry.activity_count.saturating_add(amount))
            })
            .await
    }

    /// Grants `amount` points to a user.
    ///
    /// The activity count is raised to at least the smallest count that earns the new
    /// balance, so the history stays consistent with what was granted. Backs the owner
    /// `$addpoints` command.
    pub async fn add_points(&self, user_id: u64, amount: u64) -> Result<LedgerEntry, AppError> {
        self.store
            .update(user_id, |entry| {
                let point_balance = entry.point_balance.saturating_add(amount);
                LedgerEntry {
                    activity_count: entry
                        .activity_count
                        .max(activity_for_points(point_balance)),
                    point_balance,
                    ..entry
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    async fn accumulator() -> (ActivityAccumulator, BalanceStore) {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.unwrap());
        (ActivityAccumulator::new(store.clone()), store)
    }

    #[tokio::test]
    async fn first_message_creates_entry() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;

        let entry = accumulator.on_activity(1).await?;

        assert_eq!(entry.activity_count, 1);
        assert_eq!(entry.point_balance, 0);
        assert_eq!(store.get(1).await, Some(entry));

        Ok(())
    }

    #[tokio::test]
    async fn hundredth_message_earns_a_point() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;
        store.set(1, 99, 0).await?;

        let entry = accumulator.on_activity(1).await?;

        assert_eq!(entry.activity_count, 100);
        assert_eq!(entry.point_balance, 1);

        Ok(())
    }

    #[tokio::test]
    async fn thousandth_message_adds_bonus() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;
        store.set(1, 999, 9).await?;

        let entry = accumulator.on_activity(1).await?;

        assert_eq!(entry.point_balance, 15);

        Ok(())
    }

    #[tokio::test]
    async fn activity_after_claim_rederives_balance() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;
        // balance spent by a settled claim
        store.set(1, 250, 0).await?;

        let entry = accumulator.on_activity(1).await?;

        assert_eq!(entry.activity_count, 251);
        assert_eq!(entry.point_balance, 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_activity_recomputes_points() -> Result<(), AppError> {
        let (accumulator, _store) = accumulator().await;

        let entry = accumulator.add_activity(1, 1000).await?;

        assert_eq!(entry.activity_count, 1000);
        assert_eq!(entry.point_balance, 15);

        Ok(())
    }

    #[tokio::test]
    async fn add_points_raises_activity_floor() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;
        store.set(1, 50, 0).await?;

        let entry = accumulator.add_points(1, 3).await?;

        assert_eq!(entry.point_balance, 3);
        assert_eq!(entry.activity_count, 300);

        Ok(())
    }

    #[tokio::test]
    async fn add_points_keeps_higher_activity() -> Result<(), AppError> {
        let (accumulator, store) = accumulator().await;
        // spent balance with a long history
        store.set(1, 1200, 0).await?;

        let entry = accumulator.add_points(1, 2).await?;

        assert_eq!(entry.point_balance, 2);
        assert_eq!(entry.activity_count, 1200);

        Ok(())
    }
}
