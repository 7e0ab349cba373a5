//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults so tests only spell out the fields
//! they care about.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let stats = factory::create_user_stats(&db).await?;
//!
//!     // Customize
//!     let stats = factory::user_stats::UserStatsFactory::new(&db)
//!         .user_id("123456789")
//!         .messages(250)
//!         .points(2)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod helpers;
pub mod user_stats;

pub use user_stats::{create_user_stats, create_user_stats_with};
