//! Claim state machine states, requests and outcomes.

use std::fmt;

/// One attempt to convert a user's points into market coins.
///
/// Built by the orchestrator once the user is admitted; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    /// Discord ID of the claiming user
    pub user_id: u64,
    /// Market listing the user put up for the payout
    pub listing_id: String,
    /// Point balance at the time of the request
    pub points: u64,
    /// `points * exchange rate`, the price the listing must be quoted at
    pub requested_amount: u64,
}

/// Progress of a claim through the orchestrator.
///
/// Every `ClaimOutcome` is a terminal state; `Settled` is the only state in which the
/// balance is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    Idle,
    Admitted,
    Negotiating,
    AwaitingPriceConfirmation,
    AwaitingConfirmAction,
    Settled,
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Admitted => "admitted",
            Self::Negotiating => "negotiating",
            Self::AwaitingPriceConfirmation => "awaiting_price_confirmation",
            Self::AwaitingConfirmAction => "awaiting_confirm_action",
            Self::Settled => "settled",
        };
        f.write_str(name)
    }
}

/// Why the market bot refused the purchase outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketRejection {
    /// The listing id does not exist (or was already bought)
    ListingNotFound,
    /// The paying market account cannot afford the listing
    InsufficientFunds,
}

/// Terminal result of `ClaimOrchestrator::submit_claim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Purchase confirmed and the point balance cleared.
    Success {
        /// Points spent
        points: u64,
        /// Coins paid for the listing
        amount: u64,
    },
    /// Autopay is switched off; no external call was made.
    AutopayDisabled,
    /// Another claim for the same user is still in flight.
    Busy,
    /// The user has no whole point to claim.
    InsufficientBalance,
    /// The market bot rejected the purchase.
    NotFound(MarketRejection),
    /// The correlated reply did not contain a recognizable price.
    VerificationParseFailure,
    /// The listing is priced differently from the user's claim amount.
    PriceMismatch {
        /// Price quoted by the market bot
        quoted: u64,
        /// Price the claim expected
        expected: u64,
    },
    /// Pressing the confirm button failed.
    ConfirmActionFailure,
    /// No terminal reply arrived within the listening window.
    Timeout,
    /// Transport or storage fault; the message is for logs only.
    SystemError(String),
}

impl ClaimOutcome {
    /// Whether this outcome settled the claim.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Stable short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::AutopayDisabled => "autopay_disabled",
            Self::Busy => "busy",
            Self::InsufficientBalance => "insufficient_balance",
            Self::NotFound(_) => "not_found",
            Self::VerificationParseFailure => "verification_parse_failure",
            Self::PriceMismatch { .. } => "price_mismatch",
            Self::ConfirmActionFailure => "confirm_action_failure",
            Self::Timeout => "timeout",
            Self::SystemError(_) => "system_error",
        }
    }
}
