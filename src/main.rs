use tracing_subscriber::EnvFilter;

use paybot::{bot, config::Config, error::AppError, scheduler::spam_cleanup, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let state = startup::build_state(&config, db, http_client).await?;

    // Held for the lifetime of the process so the cleanup job keeps firing
    let _scheduler = spam_cleanup::start_scheduler(state.spam.clone()).await?;

    let (bot_client, _discord_http) = bot::start::init_bot(&config, state).await?;

    bot::start::start_bot(bot_client).await
}
