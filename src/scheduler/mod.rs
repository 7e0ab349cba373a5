//! Cron jobs for automated housekeeping.

pub mod spam_cleanup;
