//! SeaORM entity definitions for the salary ledger.

pub mod prelude;

pub mod user_stats;
