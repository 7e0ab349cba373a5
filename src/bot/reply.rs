//! User-facing replies and embeds.

use serenity::all::{CreateEmbed, CreateEmbedFooter};

use crate::{
    model::{
        claim::{ClaimOutcome, MarketRejection},
        ledger::{LedgerEntry, BONUS_THRESHOLD, POINTS_THRESHOLD},
    },
    util::format::{format_number, progress_bar},
};

pub const MAIN_COLOR: u32 = 0x5865F2;
pub const SUCCESS_COLOR: u32 = 0x57F287;
pub const ERROR_COLOR: u32 = 0xED4245;
pub const LOG_COLOR: u32 = 0xFFD700;

const BAR_LENGTH: usize = 20;

/// Message shown to the claiming user for each outcome.
pub fn claim_message(outcome: &ClaimOutcome) -> String {
    match outcome {
        ClaimOutcome::Success { points, amount } => format!(
            "✅ Claim processed successfully! Paid **{}** Pokécoins for {} ⭐.",
            format_number(*amount),
            format_number(*points)
        ),
        ClaimOutcome::AutopayDisabled => {
            "⚠️ Autopay is currently **disabled** by the owner.".to_string()
        }
        ClaimOutcome::Busy => "⏳ You already have a claim in progress.".to_string(),
        ClaimOutcome::InsufficientBalance => "❌ You have no points to claim!".to_string(),
        ClaimOutcome::NotFound(MarketRejection::ListingNotFound) => {
            "❌ Market error: that listing could not be found.".to_string()
        }
        ClaimOutcome::NotFound(MarketRejection::InsufficientFunds) => {
            "❌ Market error: the payout account cannot afford that listing.".to_string()
        }
        ClaimOutcome::VerificationParseFailure => {
            "❌ Could not verify the market price.".to_string()
        }
        ClaimOutcome::PriceMismatch { quoted, expected } => format!(
            "❌ Market price ({}) does not match your claim amount ({}).",
            format_number(*quoted),
            format_number(*expected)
        ),
        ClaimOutcome::ConfirmActionFailure => "❌ Failed to confirm the purchase.".to_string(),
        ClaimOutcome::Timeout => {
            "❌ The market did not answer in time. Your points were not spent.".to_string()
        }
        ClaimOutcome::SystemError(_) => "❌ Error during autopay.".to_string(),
    }
}

pub fn claim_embed(outcome: &ClaimOutcome) -> CreateEmbed {
    let color = if outcome.is_success() {
        SUCCESS_COLOR
    } else {
        ERROR_COLOR
    };

    CreateEmbed::new()
        .description(claim_message(outcome))
        .color(color)
}

pub fn error_embed(description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new().description(description).color(ERROR_COLOR)
}

pub fn info_embed(description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new().description(description).color(MAIN_COLOR)
}

/// Builds the `!stats` embed.
///
/// # Arguments
/// - `name` - Display name of the user the stats belong to
/// - `entry` - Ledger entry, `LedgerEntry::empty` for unknown users
/// - `exchange_rate` - Coins per point, for the claimable value
pub fn stats_embed(name: &str, entry: &LedgerEntry, exchange_rate: u64) -> CreateEmbed {
    let claimable = entry.point_balance.saturating_mul(exchange_rate);

    CreateEmbed::new()
        .title(format!("📊 Stats for {}", name))
        .color(MAIN_COLOR)
        .field("Messages", format_number(entry.activity_count), true)
        .field("Points ⭐", format_number(entry.point_balance), true)
        .field("Claimable 🪙", format_number(claimable), true)
        .field(
            "Next point",
            progress_bar(
                entry.activity_count % POINTS_THRESHOLD,
                POINTS_THRESHOLD,
                BAR_LENGTH,
            ),
            false,
        )
        .field(
            "Next bonus",
            progress_bar(
                entry.activity_count % BONUS_THRESHOLD,
                BONUS_THRESHOLD,
                BAR_LENGTH,
            ),
            false,
        )
        .footer(CreateEmbedFooter::new(format!(
            "{} more messages until the next point",
            entry.activity_until_next_point()
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_reports_amount_and_points() {
        let message = claim_message(&ClaimOutcome::Success {
            points: 2,
            amount: 150_000,
        });

        assert!(message.contains("**150,000**"));
        assert!(message.contains("2 ⭐"));
    }

    #[test]
    fn price_mismatch_shows_both_amounts() {
        let message = claim_message(&ClaimOutcome::PriceMismatch {
            quoted: 100_000,
            expected: 150_000,
        });

        assert_eq!(
            message,
            "❌ Market price (100,000) does not match your claim amount (150,000)."
        );
    }

    #[test]
    fn system_error_hides_details() {
        let message = claim_message(&ClaimOutcome::SystemError("db locked".to_string()));

        assert!(!message.contains("db locked"));
    }
}
