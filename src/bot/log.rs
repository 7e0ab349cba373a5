//! Log channel events.
//!
//! Claim results and admin actions are mirrored to the configured log channel. Posting
//! is best effort: a missing channel or a failed send is only traced.

use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};

use crate::{bot::reply::LOG_COLOR, model::claim::ClaimOutcome, util::format::format_number};

/// Posts an embed to the log channel, if one is set.
pub async fn post(http: &Http, log_channel: Option<u64>, embed: CreateEmbed) {
    let Some(channel_id) = log_channel else {
        return;
    };

    let message = CreateMessage::new().embed(embed.timestamp(Timestamp::now()));
    if let Err(e) = ChannelId::new(channel_id).send_message(http, message).await {
        tracing::error!("Failed to post to log channel {}: {}", channel_id, e);
    }
}

/// Builds the log entry for a finished claim.
pub fn claim_event(user_id: u64, listing_id: &str, outcome: &ClaimOutcome) -> CreateEmbed {
    let result = match outcome {
        ClaimOutcome::Success { points, amount } => format!(
            "Paid **{}** coins for {} points",
            format_number(*amount),
            format_number(*points)
        ),
        ClaimOutcome::PriceMismatch { quoted, expected } => format!(
            "Price mismatch: quoted {}, expected {}",
            format_number(*quoted),
            format_number(*expected)
        ),
        ClaimOutcome::SystemError(reason) => format!("System error: {}", reason),
        other => other.label().replace('_', " "),
    };

    CreateEmbed::new()
        .title("💰 Claim")
        .color(LOG_COLOR)
        .field("User", format!("<@{}>", user_id), true)
        .field("Listing", format!("`{}`", listing_id), true)
        .field("Result", result, false)
}

/// Builds the log entry for an admin or owner command.
pub fn admin_event(actor_id: u64, action: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .title("🛡️ Admin action")
        .color(LOG_COLOR)
        .description(action)
        .field("By", format!("<@{}>", actor_id), true)
}
