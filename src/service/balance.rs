//! Balance store with a write-through in-memory mirror.
//!
//! The `BalanceStore` owns all ledger state. Reads are served from the mirror; every write
//! goes to the database first and lands in the mirror inside the same write-lock critical
//! section, so a reader never sees a value that is not persisted and a failed database
//! write never reaches the mirror.

use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::{data::ledger::LedgerRepository, error::AppError, model::ledger::LedgerEntry};

/// Persistent ledger with an in-memory mirror for fast reads.
///
/// Cheap to clone; clones share the same connection pool and mirror.
#[derive(Clone)]
pub struct BalanceStore {
    db: DatabaseConnection,
    cache: Arc<RwLock<HashMap<u64, LedgerEntry>>>,
}

impl BalanceStore {
    /// Creates a store with an empty mirror.
    ///
    /// Call `warm` before serving reads so the mirror reflects existing rows.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replaces the mirror with every row currently in the database.
    ///
    /// Meant for startup, before the store is shared. Rows are listed before the write
    /// lock is taken, since `list_all` holds the read lock.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of entries loaded
    /// - `Err(AppError)` - Database error; the mirror is left unchanged
    pub async fn warm(&self) -> Result<usize, AppError> {
        let entries = self.list_all().await?;

        let mut cache = self.cache.write().await;
        cache.clear();
        cache.extend(entries.into_iter().map(|entry| (entry.user_id, entry)));

        Ok(cache.len())
    }

    /// Returns the entry for a user, or `None` if the user was never credited.
    pub async fn get(&self, user_id: u64) -> Option<LedgerEntry> {
        self.cache.read().await.get(&user_id).copied()
    }

    /// Returns the entry for a user, treating an absent user as zero activity and points.
    pub async fn balance(&self, user_id: u64) -> LedgerEntry {
        self.get(user_id)
            .await
            .unwrap_or_else(|| LedgerEntry::empty(user_id))
    }

    /// Upserts both counters for a user.
    ///
    /// Idempotent: repeating the call with the same arguments changes nothing further.
    ///
    /// # Returns
    /// - `Ok(LedgerEntry)` - The stored entry
    /// - `Err(AppError)` - Database error; neither database nor mirror changed
    pub async fn set(
        &self,
        user_id: u64,
        activity_count: u64,
        point_balance: u64,
    ) -> Result<LedgerEntry, AppError> {
        let entry = LedgerEntry {
            user_id,
            activity_count,
            point_balance,
        };

        let mut cache = self.cache.write().await;
        LedgerRepository::new(&self.db).upsert(entry).await?;
        cache.insert(user_id, entry);

        Ok(entry)
    }

    /// Atomically reads, transforms and writes back one user's entry.
    ///
    /// The write lock is held for the whole read-modify-write, so concurrent updates for
    /// the same user are applied one after another in lock order. An absent user starts
    /// from `LedgerEntry::empty`. The `user_id` returned by `f` is ignored.
    pub async fn update<F>(&self, user_id: u64, f: F) -> Result<LedgerEntry, AppError>
    where
        F: FnOnce(LedgerEntry) -> LedgerEntry,
    {
        let mut cache = self.cache.write().await;

        let current = cache
            .get(&user_id)
            .copied()
            .unwrap_or_else(|| LedgerEntry::empty(user_id));
        let next = LedgerEntry {
            user_id,
            ..f(current)
        };

        LedgerRepository::new(&self.db).upsert(next).await?;
        cache.insert(user_id, next);

        Ok(next)
    }

    /// Like `update`, but leaves an absent user absent.
    ///
    /// # Returns
    /// - `Ok(Some(LedgerEntry))` - The stored entry
    /// - `Ok(None)` - The user has no entry; nothing was written
    /// - `Err(AppError)` - Database error; neither database nor mirror changed
    pub async fn update_existing<F>(
        &self,
        user_id: u64,
        f: F,
    ) -> Result<Option<LedgerEntry>, AppError>
    where
        F: FnOnce(LedgerEntry) -> LedgerEntry,
    {
        let mut cache = self.cache.write().await;

        let Some(current) = cache.get(&user_id).copied() else {
            return Ok(None);
        };
        let next = LedgerEntry {
            user_id,
            ..f(current)
        };

        LedgerRepository::new(&self.db).upsert(next).await?;
        cache.insert(user_id, next);

        Ok(Some(next))
    }

    /// Deletes a user's entry from the database and the mirror.
    ///
    /// # Returns
    /// - `Ok(true)` - The user had an entry that was removed
    /// - `Ok(false)` - Nothing to remove
    /// - `Err(AppError)` - Database error; the mirror is left unchanged
    pub async fn reset(&self, user_id: u64) -> Result<bool, AppError> {
        let mut cache = self.cache.write().await;
        let deleted = LedgerRepository::new(&self.db).delete(user_id).await?;
        cache.remove(&user_id);

        Ok(deleted)
    }

    /// Lists every persisted entry, in no particular order.
    pub async fn list_all(&self) -> Result<Vec<LedgerEntry>, AppError> {
        let _cache = self.cache.read().await;
        LedgerRepository::new(&self.db).get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn warm_loads_existing_rows() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_user_stats_with(db, "10", 250, 2).await?;
        factory::create_user_stats_with(db, "20", 1000, 0).await?;

        let store = BalanceStore::new(db.clone());
        assert!(store.get(10).await.is_none());

        assert_eq!(store.warm().await?, 2);
        assert_eq!(store.balance(10).await.point_balance, 2);
        assert_eq!(store.balance(20).await.activity_count, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn warm_replaces_stale_mirror() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let store = BalanceStore::new(db.clone());

        store.set(10, 250, 2).await?;
        LedgerRepository::new(db).delete(10).await?;
        factory::create_user_stats_with(db, "20", 1000, 0).await?;

        assert_eq!(store.warm().await?, 1);
        assert!(store.get(10).await.is_none());
        assert_eq!(store.balance(20).await.activity_count, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn absent_user_reads_as_zero() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        assert!(store.get(5).await.is_none());
        assert_eq!(store.balance(5).await, LedgerEntry::empty(5));

        Ok(())
    }

    #[tokio::test]
    async fn set_writes_through_to_database() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let store = BalanceStore::new(db.clone());

        store.set(7, 250, 2).await?;

        let persisted = LedgerRepository::new(db).find_by_user_id(7).await?;
        assert_eq!(persisted, store.get(7).await);

        Ok(())
    }

    #[tokio::test]
    async fn set_is_idempotent() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        let first = store.set(7, 250, 2).await?;
        let second = store.set(7, 250, 2).await?;

        assert_eq!(first, second);
        assert_eq!(store.list_all().await?, vec![first]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_write_leaves_mirror_untouched() -> Result<(), AppError> {
        // no tables, so every write fails at the database
        let test = TestBuilder::new().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        assert!(store.set(7, 100, 1).await.is_err());
        assert!(store.update(7, |e| e.with_activity(1)).await.is_err());
        assert!(store.get(7).await.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_starts_from_empty_entry() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        let entry = store
            .update(9, |e| e.with_activity(e.activity_count + 100))
            .await?;

        assert_eq!(entry, LedgerEntry::empty(9).with_activity(100));

        Ok(())
    }

    #[tokio::test]
    async fn update_existing_skips_absent_user() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        assert_eq!(store.update_existing(9, |e| e.settled()).await?, None);
        assert!(store.get(9).await.is_none());
        assert!(store.list_all().await?.is_empty());

        store.set(9, 250, 2).await?;
        let settled = store.update_existing(9, |e| e.settled()).await?;

        assert_eq!(settled, Some(LedgerEntry::empty(9).with_activity(250).settled()));
        assert_eq!(store.list_all().await?, vec![settled.unwrap()]);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let store = BalanceStore::new(test.db.clone().unwrap());

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .update(3, |e| e.with_activity(e.activity_count + 1))
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap()?;
        }

        assert_eq!(store.balance(3).await.activity_count, 20);

        Ok(())
    }

    #[tokio::test]
    async fn reset_removes_entry_everywhere() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let store = BalanceStore::new(db.clone());

        store.set(4, 300, 3).await?;

        assert!(store.reset(4).await?);
        assert!(store.get(4).await.is_none());
        assert!(LedgerRepository::new(db).find_by_user_id(4).await?.is_none());
        assert!(!store.reset(4).await?);

        Ok(())
    }
}
