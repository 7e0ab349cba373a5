//! Staff salary bot.
//!
//! Members earn activity in a monitored Discord channel; activity converts into points,
//! and points are paid out through a third-party market bot by the claim orchestrator.
//!
//! # Architecture
//!
//! - **Bot Layer** (`bot/`) - Serenity event handlers, prefix commands and replies
//! - **Service Layer** (`service/`) - Balance store, activity accumulator, claim orchestrator,
//!   concurrency guard and spam filter
//! - **Market Layer** (`market/`) - Transport to the market bot (gateway hub and HTTP relay)
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models: ledger entries, claims, market messages
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state handed to the event handler
//! - **Startup** (`startup`) - Database, HTTP client and service initialization
//! - **Scheduler** (`scheduler/`) - Cron jobs for housekeeping

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod market;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
