use std::{str::FromStr, time::Duration};

use crate::{
    error::{config::ConfigError, AppError},
    model::ledger::DEFAULT_EXCHANGE_RATE,
    service::claim::DEFAULT_CLAIM_TIMEOUT,
};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Channel the market bot and the relay account talk in
    pub market_channel_id: u64,
    pub market_bot_id: u64,
    pub market_relay_url: String,
    pub market_relay_token: String,

    pub owner_ids: Vec<u64>,
    pub allowed_role_id: Option<u64>,

    /// Initial monitored channel; admins can move it with `!setchannel`
    pub monitored_channel_id: Option<u64>,
    /// Initial log channel; admins can move it with `!setlogchannel`
    pub log_channel_id: Option<u64>,

    pub autopay_enabled: bool,
    pub claim_timeout: Duration,
    pub exchange_rate: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and every value parsable
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            database_url: vars.required("DATABASE_URL")?,
            discord_bot_token: vars.required("DISCORD_BOT_TOKEN")?,
            market_channel_id: vars.required_parsed("MARKET_CHANNEL_ID")?,
            market_bot_id: vars.required_parsed("MARKET_BOT_ID")?,
            market_relay_url: vars.required("MARKET_RELAY_URL")?,
            market_relay_token: vars.required("MARKET_RELAY_TOKEN")?,
            owner_ids: vars.id_list("OWNER_IDS")?,
            allowed_role_id: vars.optional_parsed("ALLOWED_ROLE_ID")?,
            monitored_channel_id: vars.optional_parsed("MONITORED_CHANNEL_ID")?,
            log_channel_id: vars.optional_parsed("LOG_CHANNEL_ID")?,
            autopay_enabled: vars.optional_parsed("AUTOPAY_ENABLED")?.unwrap_or(true),
            claim_timeout: vars
                .optional_parsed("CLAIM_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CLAIM_TIMEOUT),
            exchange_rate: vars
                .optional_parsed("EXCHANGE_RATE")?
                .unwrap_or(DEFAULT_EXCHANGE_RATE),
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank values are treated the same.
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn required_parsed<T>(&self, name: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse(name, self.required(name)?)
    }

    fn optional_parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(name).map(|value| parse(name, value)).transpose()
    }

    /// Comma separated Discord IDs, e.g. `OWNER_IDS=123,456`.
    fn id_list(&self, name: &str) -> Result<Vec<u64>, ConfigError> {
        self.required(name)?
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| parse(name, id.to_string()))
            .collect()
    }
}

fn parse<T>(name: &str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "sqlite://paybot.db?mode=rwc"),
            ("DISCORD_BOT_TOKEN", "token"),
            ("MARKET_CHANNEL_ID", "111"),
            ("MARKET_BOT_ID", "716390085896962058"),
            ("MARKET_RELAY_URL", "http://localhost:8080"),
            ("MARKET_RELAY_TOKEN", "secret"),
            ("OWNER_IDS", "1, 2,3"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, AppError> {
        Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn applies_defaults() {
        let config = load(&base()).unwrap();

        assert_eq!(config.market_bot_id, 716390085896962058);
        assert_eq!(config.owner_ids, vec![1, 2, 3]);
        assert_eq!(config.allowed_role_id, None);
        assert_eq!(config.monitored_channel_id, None);
        assert!(config.autopay_enabled);
        assert_eq!(config.claim_timeout, Duration::from_secs(30));
        assert_eq!(config.exchange_rate, 75_000);
    }

    #[test]
    fn reads_optional_overrides() {
        let mut vars = base();
        vars.insert("ALLOWED_ROLE_ID", "55");
        vars.insert("LOG_CHANNEL_ID", "66");
        vars.insert("AUTOPAY_ENABLED", "false");
        vars.insert("CLAIM_TIMEOUT_SECS", "10");
        vars.insert("EXCHANGE_RATE", "50000");

        let config = load(&vars).unwrap();

        assert_eq!(config.allowed_role_id, Some(55));
        assert_eq!(config.log_channel_id, Some(66));
        assert!(!config.autopay_enabled);
        assert_eq!(config.claim_timeout, Duration::from_secs(10));
        assert_eq!(config.exchange_rate, 50_000);
    }

    #[test]
    fn reports_missing_variable() {
        let mut vars = base();
        vars.remove("DISCORD_BOT_TOKEN");

        let result = load(&vars);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DISCORD_BOT_TOKEN"
        ));
    }

    #[test]
    fn reports_invalid_variable() {
        let mut vars = base();
        vars.insert("OWNER_IDS", "1,two");

        let result = load(&vars);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, value, .. }))
                if name == "OWNER_IDS" && value == "two"
        ));
    }
}
