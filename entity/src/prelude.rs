pub use super::user_stats::Entity as UserStats;
