//! Message create handler.
//!
//! Every guild message goes down exactly one path:
//! - market bot messages in the market channel are published to the market hub
//! - messages from other bots are ignored
//! - recognized commands are executed and never count as activity
//! - anything else in the monitored channel passes the spam filter and earns activity

use std::time::Instant;

use serenity::all::{Context, Message};

use crate::{
    bot::{command, handler::command::handle_command},
    model::market::MarketMessage,
    state::AppState,
};

/// Handle message creation in a channel
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.channel_id.get() == state.market.channel_id
        && message.author.id.get() == state.market.bot_id
    {
        state.market_hub.publish(MarketMessage::from(&message));
        return;
    }

    // Only guild channels from real users
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    match command::parse(&message.content) {
        Some(parsed) => handle_command(state, &ctx, &message, parsed).await,
        None => credit_activity(state, &message).await,
    }
}

async fn credit_activity(state: &AppState, message: &Message) {
    let channels = state.channels().await;
    if channels.monitored != Some(message.channel_id.get()) {
        return;
    }

    let user_id = message.author.id.get();
    if !state.spam.admit(user_id, Instant::now()) {
        tracing::debug!("Dropped activity from user {} (rate limited)", user_id);
        return;
    }

    match state.accumulator.on_activity(user_id).await {
        Ok(entry) => tracing::debug!(
            "User {} now at {} messages, {} points",
            user_id,
            entry.activity_count,
            entry.point_balance
        ),
        Err(e) => tracing::error!("Failed to credit activity for user {}: {}", user_id, e),
    }
}
