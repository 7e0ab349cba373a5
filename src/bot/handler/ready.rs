//! Ready event handler for bot initialization.
//!
//! Fired once per gateway connection after the handshake. Logs the connection and the
//! runtime settings the bot starts with.

use serenity::all::{ActivityData, Context, Ready};

use crate::state::AppState;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Application state, for the startup summary
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let channels = state.channels().await;
    tracing::info!(
        "Monitoring channel {:?}, logging to {:?}, autopay {}",
        channels.monitored,
        channels.log,
        if state.autopay.is_enabled() { "on" } else { "off" }
    );

    ctx.set_activity(Some(ActivityData::watching("the salary ledger")));
}
