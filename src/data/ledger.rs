//! Ledger data repository for database operations.
//!
//! This module provides the `LedgerRepository` for reading and writing `user_stats`
//! rows. It is the only code that talks to the table; the `BalanceStore` service wraps
//! it with the in-memory mirror.

use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::ledger::LedgerEntry, util::parse::counter_to_i64};

/// Repository providing database operations for the salary ledger.
pub struct LedgerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerRepository<'a> {
    /// Creates a new LedgerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `LedgerRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the ledger entry for a user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Some(LedgerEntry))` - Entry found
    /// - `Ok(None)` - The user has never been credited
    /// - `Err(AppError)` - Database error or malformed stored row
    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<LedgerEntry>, AppError> {
        let entity = entity::prelude::UserStats::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(LedgerEntry::from_entity).transpose()
    }

    /// Inserts or overwrites the ledger entry for a user.
    ///
    /// Both counters are replaced on conflict, so calling this twice with the same entry
    /// leaves the table exactly as one call would.
    ///
    /// # Arguments
    /// - `entry` - Ledger entry to store
    ///
    /// # Returns
    /// - `Ok(())` - Row written
    /// - `Err(AppError)` - Database error or counter outside the column range
    pub async fn upsert(&self, entry: LedgerEntry) -> Result<(), AppError> {
        let messages = counter_to_i64(entry.user_id, "messages", entry.activity_count)?;
        let points = counter_to_i64(entry.user_id, "points", entry.point_balance)?;

        entity::prelude::UserStats::insert(entity::user_stats::ActiveModel {
            user_id: ActiveValue::Set(entry.user_id.to_string()),
            messages: ActiveValue::Set(messages),
            points: ActiveValue::Set(points),
        })
        .on_conflict(
            OnConflict::column(entity::user_stats::Column::UserId)
                .update_columns([
                    entity::user_stats::Column::Messages,
                    entity::user_stats::Column::Points,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Deletes the ledger entry for a user.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - The user had no row
    /// - `Err(AppError)` - Database error
    pub async fn delete(&self, user_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::UserStats::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Returns every stored ledger entry, in no particular order.
    ///
    /// Used to warm the in-memory mirror at startup.
    pub async fn get_all(&self) -> Result<Vec<LedgerEntry>, AppError> {
        let entities = entity::prelude::UserStats::find().all(self.db).await?;

        entities.into_iter().map(LedgerEntry::from_entity).collect()
    }
}
