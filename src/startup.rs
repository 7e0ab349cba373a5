use std::{sync::Arc, time::Duration};

use crate::{
    bot::permission::Permissions,
    config::Config,
    error::AppError,
    market::{MarketHub, MarketRelay},
    service::{
        balance::BalanceStore,
        claim::ClaimOrchestrator,
        guard::{AutopaySwitch, ClaimGuard},
    },
    state::{AppState, ChannelSettings, MarketChannel},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the `user_stats` table
/// exists before the ledger is warmed.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for the market relay.
///
/// Redirects are disabled so the bearer token is never forwarded to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(15))
        .build()?;

    Ok(client)
}

/// Wires the ledger, the claim orchestrator and the market transport into `AppState`.
///
/// Warms the balance store from the database before returning, so the first command
/// already sees every persisted balance.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Migrated database connection
/// - `http_client` - HTTP client for the market relay
///
/// # Returns
/// - `Ok(AppState)` - Fully initialized state
/// - `Err(AppError)` - Failed to load the ledger
pub async fn build_state(
    config: &Config,
    db: sea_orm::DatabaseConnection,
    http_client: reqwest::Client,
) -> Result<AppState, AppError> {
    let store = BalanceStore::new(db);
    let loaded = store.warm().await?;
    tracing::info!("Loaded {} ledger entries", loaded);

    let market_hub = MarketHub::new();
    let relay = Arc::new(MarketRelay::new(
        http_client,
        config.market_relay_url.clone(),
        config.market_relay_token.clone(),
        config.market_channel_id,
        config.market_bot_id,
        market_hub.clone(),
    ));

    let autopay = AutopaySwitch::new(config.autopay_enabled);
    let orchestrator = ClaimOrchestrator::new(
        store.clone(),
        ClaimGuard::new(),
        autopay.clone(),
        relay.clone(),
        relay,
        config.exchange_rate,
        config.claim_timeout,
    );

    Ok(AppState::new(
        store,
        orchestrator,
        autopay,
        market_hub,
        MarketChannel {
            channel_id: config.market_channel_id,
            bot_id: config.market_bot_id,
        },
        Permissions::new(config.owner_ids.iter().copied(), config.allowed_role_id),
        ChannelSettings {
            monitored: config.monitored_channel_id,
            log: config.log_channel_id,
        },
    ))
}
