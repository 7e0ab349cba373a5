//! Ledger row factory for creating test user stats entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `user_stats` rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user_stats::UserStatsFactory;
///
/// let row = UserStatsFactory::new(&db)
///     .user_id("123456789")
///     .messages(1000)
///     .points(15)
///     .build()
///     .await?;
/// ```
pub struct UserStatsFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    messages: i64,
    points: i64,
}

impl<'a> UserStatsFactory<'a> {
    /// Creates a new UserStatsFactory with default values.
    ///
    /// Defaults:
    /// - user_id: auto-incremented numeric id offset into the snowflake range
    /// - messages: `0`
    /// - points: `0`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserStatsFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = 100_000_000_000_000_000 + next_id();
        Self {
            db,
            user_id: id.to_string(),
            messages: 0,
            points: 0,
        }
    }

    /// Sets the Discord user ID for the row.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the stored message count.
    pub fn messages(mut self, messages: i64) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the stored point balance.
    pub fn points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    /// Builds and inserts the row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user_stats::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_stats::Model, DbErr> {
        entity::user_stats::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            messages: ActiveValue::Set(self.messages),
            points: ActiveValue::Set(self.points),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a row with default values.
///
/// Shorthand for `UserStatsFactory::new(db).build().await`.
pub async fn create_user_stats(
    db: &DatabaseConnection,
) -> Result<entity::user_stats::Model, DbErr> {
    UserStatsFactory::new(db).build().await
}

/// Creates a row for a specific user with the given counters.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord ID as string or number
/// - `messages` - Stored message count
/// - `points` - Stored point balance
pub async fn create_user_stats_with(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    messages: i64,
    points: i64,
) -> Result<entity::user_stats::Model, DbErr> {
    UserStatsFactory::new(db)
        .user_id(user_id)
        .messages(messages)
        .points(points)
        .build()
        .await
}
