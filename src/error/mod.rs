//! Error types for the salary bot.
//!
//! `AppError` is the top-level error that wraps the domain-specific errors below and the
//! third-party errors raised by SeaORM, Serenity, reqwest and the cron scheduler. Claim
//! failures are not errors: the orchestrator reports them as a `ClaimOutcome`.

pub mod config;
pub mod internal;
pub mod transport;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, transport::TransportError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion so `?` works across the
/// data, service and bot layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// HTTP client construction or request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Market transport error (relay rejected a request, feed closed, ...).
    #[error(transparent)]
    TransportErr(#[from] TransportError),

    /// Internal issue indicating unexpected stored data or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
