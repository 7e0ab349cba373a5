//! Command execution.
//!
//! Every command answers in the channel it was sent in. Admin and owner commands are
//! checked against `Permissions` before anything is changed, and changes are mirrored
//! to the log channel.

use serenity::all::{Context, CreateEmbed, CreateMessage, Message};

use crate::{
    bot::{
        command::{Command, Usage},
        log,
        reply::{claim_embed, error_embed, info_embed, stats_embed},
    },
    error::AppError,
    state::AppState,
};

/// Required authority for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Member,
    Admin,
    Owner,
}

impl Command {
    fn access(&self) -> Access {
        match self {
            Command::Claim { .. } | Command::Stats { .. } | Command::MyId => Access::Member,
            Command::SetChannel | Command::SetLogChannel | Command::Reset { .. } => Access::Admin,
            Command::Autopay { .. } | Command::AddMessages { .. } | Command::AddPoints { .. } => {
                Access::Owner
            }
        }
    }
}

/// Executes a parsed command and replies to its author.
///
/// Failures are logged and answered with a generic error; nothing propagates to the
/// gateway.
pub async fn handle_command(
    state: &AppState,
    ctx: &Context,
    message: &Message,
    parsed: Result<Command, Usage>,
) {
    let result = match parsed {
        Ok(command) => execute(state, ctx, message, command).await,
        Err(Usage(usage)) => reply(ctx, message, error_embed(usage)).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "Failed to handle command '{}' from user {}: {}",
            message.content,
            message.author.id,
            e
        );
        let _ = reply(ctx, message, error_embed("⚠️ An error occurred.")).await;
    }
}

async fn execute(
    state: &AppState,
    ctx: &Context,
    message: &Message,
    command: Command,
) -> Result<(), AppError> {
    let author_id = message.author.id.get();

    if !is_permitted(state, message, command.access()) {
        tracing::warn!(
            "User {} is not allowed to run {:?}",
            author_id,
            command
        );
        return reply(ctx, message, error_embed("❌ You don't have permission.")).await;
    }

    match command {
        Command::Claim { listing_id } => {
            let outcome = state
                .orchestrator
                .submit_claim(author_id, &listing_id)
                .await;

            reply(ctx, message, claim_embed(&outcome)).await?;
            log_event(
                state,
                ctx,
                log::claim_event(author_id, &listing_id, &outcome),
            )
            .await;
        }
        Command::Stats { target } => {
            let user_id = target.unwrap_or(author_id);
            let name = display_name(message, user_id);
            let entry = state.store.balance(user_id).await;

            reply(
                ctx,
                message,
                stats_embed(&name, &entry, state.orchestrator.exchange_rate()),
            )
            .await?;
        }
        Command::MyId => {
            reply(
                ctx,
                message,
                info_embed(format!("🆔 Your Discord user ID is `{}`", author_id)),
            )
            .await?;
        }
        Command::SetChannel => {
            let channel_id = message.channel_id.get();
            state.set_monitored_channel(channel_id).await;

            reply(
                ctx,
                message,
                info_embed(format!("#️⃣ Now monitoring <#{}> for activity.", channel_id)),
            )
            .await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Monitored channel set to <#{}>", channel_id)),
            )
            .await;
        }
        Command::SetLogChannel => {
            let channel_id = message.channel_id.get();
            state.set_log_channel(channel_id).await;

            reply(
                ctx,
                message,
                info_embed(format!("📝 Logging to <#{}>.", channel_id)),
            )
            .await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Log channel set to <#{}>", channel_id)),
            )
            .await;
        }
        Command::Reset { target } => {
            let text = if state.store.reset(target).await? {
                format!("♻️ Reset all data for <@{}>.", target)
            } else {
                format!("<@{}> has no data to reset.", target)
            };

            reply(ctx, message, info_embed(text)).await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Reset data for <@{}>", target)),
            )
            .await;
        }
        Command::Autopay { enabled } => {
            let previous = state.autopay.set(enabled);
            let status = if enabled { "enabled" } else { "disabled" };
            tracing::info!("Autopay {} by user {}", status, author_id);

            let text = if previous == enabled {
                format!("🔌 Autopay is already **{}**.", status)
            } else {
                format!("🔌 Autopay is now **{}**.", status)
            };

            reply(ctx, message, info_embed(text)).await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Autopay {}", status)),
            )
            .await;
        }
        Command::AddMessages { target, amount } => {
            let entry = state.accumulator.add_activity(target, amount).await?;

            reply(
                ctx,
                message,
                info_embed(format!(
                    "🛠️ Added {} messages to <@{}>. They now have {} messages and {} points.",
                    amount, target, entry.activity_count, entry.point_balance
                )),
            )
            .await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Added {} messages to <@{}>", amount, target)),
            )
            .await;
        }
        Command::AddPoints { target, amount } => {
            let entry = state.accumulator.add_points(target, amount).await?;

            reply(
                ctx,
                message,
                info_embed(format!(
                    "🛠️ Added {} points to <@{}>. They now have {} messages and {} points.",
                    amount, target, entry.activity_count, entry.point_balance
                )),
            )
            .await?;
            log_event(
                state,
                ctx,
                log::admin_event(author_id, format!("Added {} points to <@{}>", amount, target)),
            )
            .await;
        }
    }

    Ok(())
}

fn is_permitted(state: &AppState, message: &Message, access: Access) -> bool {
    let author_id = message.author.id.get();

    match access {
        Access::Member => true,
        Access::Owner => state.permissions.is_owner(author_id),
        Access::Admin => {
            let role_ids: Vec<u64> = message
                .member
                .as_ref()
                .map(|member| member.roles.iter().map(|role| role.get()).collect())
                .unwrap_or_default();

            state.permissions.is_admin(author_id, &role_ids)
        }
    }
}

/// Name for the stats title; the author or a mentioned user, else the raw ID.
fn display_name(message: &Message, user_id: u64) -> String {
    if message.author.id.get() == user_id {
        return message.author.name.clone();
    }

    message
        .mentions
        .iter()
        .find(|user| user.id.get() == user_id)
        .map(|user| user.name.clone())
        .unwrap_or_else(|| format!("User {}", user_id))
}

async fn reply(ctx: &Context, message: &Message, embed: CreateEmbed) -> Result<(), AppError> {
    let response = CreateMessage::new()
        .embed(embed)
        .reference_message(message);
    message.channel_id.send_message(&ctx.http, response).await?;

    Ok(())
}

async fn log_event(state: &AppState, ctx: &Context, embed: CreateEmbed) {
    let channels = state.channels().await;
    log::post(&ctx.http, channels.log, embed).await;
}
