//! Prefix command parsing.
//!
//! Member and admin commands use `!`, owner ledger adjustments use `$`. Parsing is pure
//! so the whole command surface can be tested without a gateway.

use serenity::utils::parse_user_mention;

pub const PREFIX: char = '!';
pub const OWNER_PREFIX: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!claim <listing>`
    Claim { listing_id: String },
    /// `!stats [@user]`
    Stats { target: Option<u64> },
    /// `!myid`
    MyId,
    /// `!setchannel`
    SetChannel,
    /// `!setlogchannel`
    SetLogChannel,
    /// `!reset @user`
    Reset { target: u64 },
    /// `!autopay on|off`
    Autopay { enabled: bool },
    /// `$addmessages @user <n>`
    AddMessages { target: u64, amount: u64 },
    /// `$addpoints @user <n>`
    AddPoints { target: u64, amount: u64 },
}

/// A known command with missing or malformed arguments; holds the usage hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage(pub &'static str);

/// Parses a message into a command.
///
/// # Returns
/// - `None` - Not a command, or an unknown command name
/// - `Some(Ok(Command))` - A well-formed command
/// - `Some(Err(Usage))` - A known command with bad arguments
pub fn parse(content: &str) -> Option<Result<Command, Usage>> {
    let content = content.trim();
    let mut chars = content.chars();
    let prefix = chars.next()?;
    let mut args = chars.as_str().split_whitespace();
    let name = args.next()?.to_lowercase();

    match prefix {
        PREFIX => parse_member_command(&name, args),
        OWNER_PREFIX => parse_owner_command(&name, args),
        _ => None,
    }
}

fn parse_member_command<'a>(
    name: &str,
    mut args: impl Iterator<Item = &'a str>,
) -> Option<Result<Command, Usage>> {
    let command = match name {
        "claim" => args
            .next()
            .filter(|listing_id| is_listing_id(listing_id))
            .map(|listing_id| Command::Claim {
                listing_id: listing_id.to_string(),
            })
            .ok_or(Usage("Please provide your Market ID: `!claim <market_id>`")),
        "stats" => match args.next() {
            None => Ok(Command::Stats { target: None }),
            Some(arg) => parse_user(arg)
                .map(|target| Command::Stats {
                    target: Some(target),
                })
                .ok_or(Usage("Usage: `!stats` or `!stats @user`")),
        },
        "myid" => Ok(Command::MyId),
        "setchannel" => Ok(Command::SetChannel),
        "setlogchannel" => Ok(Command::SetLogChannel),
        "reset" => args
            .next()
            .and_then(parse_user)
            .map(|target| Command::Reset { target })
            .ok_or(Usage("Usage: `!reset @user`")),
        "autopay" => match args.next().map(str::to_lowercase).as_deref() {
            Some("on") => Ok(Command::Autopay { enabled: true }),
            Some("off") => Ok(Command::Autopay { enabled: false }),
            _ => Err(Usage("Usage: `!autopay on` or `!autopay off`")),
        },
        _ => return None,
    };

    Some(command)
}

fn parse_owner_command<'a>(
    name: &str,
    mut args: impl Iterator<Item = &'a str>,
) -> Option<Result<Command, Usage>> {
    let usage = match name {
        "addmessages" => Usage("Usage: `$addmessages @user <number>`"),
        "addpoints" => Usage("Usage: `$addpoints @user <number>`"),
        _ => return None,
    };

    let target = args.next().and_then(parse_user);
    let amount = args
        .next()
        .and_then(|arg| arg.parse::<u64>().ok())
        .filter(|amount| *amount > 0);

    let (Some(target), Some(amount)) = (target, amount) else {
        return Some(Err(usage));
    };

    Some(Ok(match name {
        "addmessages" => Command::AddMessages { target, amount },
        _ => Command::AddPoints { target, amount },
    }))
}

/// Market listing IDs are ASCII letters and digits. The ID is posted verbatim to the
/// market channel.
fn is_listing_id(arg: &str) -> bool {
    arg.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `<@id>`, `<@!id>` or a bare user ID.
fn parse_user(arg: &str) -> Option<u64> {
    parse_user_mention(arg)
        .map(|id| id.get())
        .or_else(|| arg.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_plain_messages_and_unknown_commands() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("!"), None);
        assert_eq!(parse("!leaderboard"), None);
        assert_eq!(parse("$claim 123"), None);
    }

    #[test]
    fn parses_claim() {
        assert_eq!(
            parse("!claim 5821034"),
            Some(Ok(Command::Claim {
                listing_id: "5821034".to_string()
            }))
        );
        assert!(matches!(parse("!CLAIM"), Some(Err(_))));
    }

    #[test]
    fn rejects_claim_with_non_alphanumeric_listing() {
        for content in [
            "!claim @everyone",
            "!claim <@123456789>",
            "!claim 58-21",
            "!claim ５８２",
        ] {
            assert!(
                matches!(parse(content), Some(Err(_))),
                "accepted {:?}",
                content
            );
        }
        assert!(matches!(parse("!claim abc123"), Some(Ok(_))));
    }

    #[test]
    fn parses_stats_with_and_without_target() {
        assert_eq!(parse("!stats"), Some(Ok(Command::Stats { target: None })));
        assert_eq!(
            parse("!stats <@!123456789>"),
            Some(Ok(Command::Stats {
                target: Some(123456789)
            }))
        );
        assert!(matches!(parse("!stats someone"), Some(Err(_))));
    }

    #[test]
    fn parses_admin_commands() {
        assert_eq!(parse("!myid"), Some(Ok(Command::MyId)));
        assert_eq!(parse("!setchannel"), Some(Ok(Command::SetChannel)));
        assert_eq!(parse("!setlogchannel"), Some(Ok(Command::SetLogChannel)));
        assert_eq!(
            parse("!reset <@42>"),
            Some(Ok(Command::Reset { target: 42 }))
        );
        assert!(matches!(parse("!reset"), Some(Err(_))));
    }

    #[test]
    fn parses_autopay_toggle() {
        assert_eq!(
            parse("!autopay ON"),
            Some(Ok(Command::Autopay { enabled: true }))
        );
        assert_eq!(
            parse("!autopay off"),
            Some(Ok(Command::Autopay { enabled: false }))
        );
        assert!(matches!(parse("!autopay maybe"), Some(Err(_))));
    }

    #[test]
    fn parses_owner_adjustments() {
        assert_eq!(
            parse("$addmessages <@42> 250"),
            Some(Ok(Command::AddMessages {
                target: 42,
                amount: 250
            }))
        );
        assert_eq!(
            parse("$addpoints 42 3"),
            Some(Ok(Command::AddPoints {
                target: 42,
                amount: 3
            }))
        );
        assert!(matches!(parse("$addpoints <@42>"), Some(Err(_))));
        assert!(matches!(parse("$addpoints <@42> -3"), Some(Err(_))));
        assert!(matches!(parse("$addmessages <@42> 0"), Some(Err(_))));
    }
}
