//! Application state shared across all gateway event handlers.
//!
//! `AppState` is built once during startup and cloned into the Serenity event handler
//! and the scheduler. Every field is cheap to clone: the services share their state
//! through `Arc`s and the database connection is a pool.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    bot::permission::Permissions,
    market::MarketHub,
    service::{
        activity::ActivityAccumulator,
        balance::BalanceStore,
        claim::ClaimOrchestrator,
        guard::AutopaySwitch,
        spam::SpamFilter,
    },
};

/// Channels the bot reacts to, changeable at runtime by admins.
///
/// Kept in memory only; a restart falls back to the configured values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSettings {
    /// Channel whose messages earn activity
    pub monitored: Option<u64>,
    /// Channel claim results and admin actions are logged to
    pub log: Option<u64>,
}

/// Where the market bot is observed.
#[derive(Debug, Clone, Copy)]
pub struct MarketChannel {
    pub channel_id: u64,
    pub bot_id: u64,
}

#[derive(Clone)]
pub struct AppState {
    /// Ledger reads for `!stats` and admin resets
    pub store: BalanceStore,

    /// Credits monitored-channel activity and owner adjustments
    pub accumulator: ActivityAccumulator,

    /// Runs `!claim`
    pub orchestrator: ClaimOrchestrator,

    /// Toggled by `!autopay`; shared with the orchestrator
    pub autopay: AutopaySwitch,

    /// Rate filter ahead of the accumulator; pruned by the scheduler
    pub spam: SpamFilter,

    /// Fan-out of market bot messages seen on the gateway
    pub market_hub: MarketHub,

    pub market: MarketChannel,

    pub permissions: Permissions,

    pub channels: Arc<RwLock<ChannelSettings>>,
}

impl AppState {
    /// Creates the application state from already initialized services.
    ///
    /// # Arguments
    /// - `store` - Warmed balance store
    /// - `orchestrator` - Claim orchestrator sharing `store` and `autopay`
    /// - `autopay` - Autopay switch
    /// - `market_hub` - Hub the orchestrator's transport subscribes to
    /// - `market` - Market channel and bot
    /// - `permissions` - Owner and admin role configuration
    /// - `channels` - Initial monitored and log channels
    pub fn new(
        store: BalanceStore,
        orchestrator: ClaimOrchestrator,
        autopay: AutopaySwitch,
        market_hub: MarketHub,
        market: MarketChannel,
        permissions: Permissions,
        channels: ChannelSettings,
    ) -> Self {
        Self {
            accumulator: ActivityAccumulator::new(store.clone()),
            store,
            orchestrator,
            autopay,
            spam: SpamFilter::default(),
            market_hub,
            market,
            permissions,
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    pub async fn channels(&self) -> ChannelSettings {
        *self.channels.read().await
    }

    pub async fn set_monitored_channel(&self, channel_id: u64) {
        self.channels.write().await.monitored = Some(channel_id);
    }

    pub async fn set_log_channel(&self, channel_id: u64) {
        self.channels.write().await.log = Some(channel_id);
    }
}
