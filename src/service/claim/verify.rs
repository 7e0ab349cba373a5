//! Interpretation of the market bot's free-text replies.
//!
//! The state machine never looks at reply text itself; it only sees a `MarketReply`.

use regex::Regex;
use std::sync::LazyLock;

const LISTING_NOT_FOUND: &str = "I could not find that market listing";
const INSUFFICIENT_FUNDS: &str = "You do not have enough Pokécoins";

/// `for **150,000** Pokécoins` with one or two emphasis markers on either side.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)for\s+\*{1,2}([0-9,]+)\*{1,2}\s+pokécoins").expect("valid price regex")
});

/// What a correlated market reply says about the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketReply {
    /// The reply quotes this price for the listing
    Quoted(u64),
    /// The listing does not exist
    ListingNotFound,
    /// The paying account cannot afford the listing
    InsufficientFunds,
    /// Neither a known error nor a recognizable price
    Unrecognized,
}

/// Classifies a market bot reply.
///
/// Known error texts win over a price match; a price too large for `u64` is treated as
/// unrecognized.
pub fn parse_market_reply(content: &str) -> MarketReply {
    if content.contains(LISTING_NOT_FOUND) {
        return MarketReply::ListingNotFound;
    }
    if content.contains(INSUFFICIENT_FUNDS) {
        return MarketReply::InsufficientFunds;
    }

    PRICE_PATTERN
        .captures(content)
        .and_then(|captures| captures[1].replace(',', "").parse::<u64>().ok())
        .map_or(MarketReply::Unrecognized, MarketReply::Quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bold_price_with_commas() {
        let reply = "Are you sure you want to buy this **Level 12 Pikachu** for **150,000** Pokécoins?";
        assert_eq!(parse_market_reply(reply), MarketReply::Quoted(150_000));
    }

    #[test]
    fn tolerates_single_emphasis_and_case() {
        assert_eq!(
            parse_market_reply("buy it FOR *75,000* POKÉCOINS?"),
            MarketReply::Quoted(75_000)
        );
        assert_eq!(
            parse_market_reply("for **900** pokécoins"),
            MarketReply::Quoted(900)
        );
    }

    #[test]
    fn detects_missing_listing() {
        assert_eq!(
            parse_market_reply("I could not find that market listing!"),
            MarketReply::ListingNotFound
        );
    }

    #[test]
    fn detects_insufficient_funds() {
        assert_eq!(
            parse_market_reply("You do not have enough Pokécoins to buy that."),
            MarketReply::InsufficientFunds
        );
    }

    #[test]
    fn rejects_unformatted_or_missing_price() {
        assert_eq!(parse_market_reply("for 150,000 Pokécoins"), MarketReply::Unrecognized);
        assert_eq!(parse_market_reply("Purchase complete."), MarketReply::Unrecognized);
        assert_eq!(parse_market_reply("for **lots** Pokécoins"), MarketReply::Unrecognized);
    }

    #[test]
    fn rejects_overflowing_price() {
        assert_eq!(
            parse_market_reply("for **99,999,999,999,999,999,999** Pokécoins"),
            MarketReply::Unrecognized
        );
    }
}
