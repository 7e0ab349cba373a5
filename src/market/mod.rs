//! Market transport: how the orchestrator talks to the third-party market bot.
//!
//! The orchestrator only sees the two traits below. In production both are implemented
//! by `MarketRelay`, which asks an external automation relay to post the purchase command
//! and press buttons as the paying market account, while the replies are observed through
//! the bot's own gateway connection and fanned out by `MarketHub`.

pub mod gateway;
pub mod hub;
pub mod relay;

use serenity::async_trait;

use crate::{
    error::transport::TransportError,
    model::market::{ActionHandle, MarketMessage},
};

pub use hub::{MarketFeed, MarketHub};
pub use relay::MarketRelay;

/// Sends purchase requests to the market bot and exposes its replies.
#[async_trait]
pub trait MarketTransport: Send + Sync {
    /// Opens a listening window on the market bot's messages.
    ///
    /// Only messages published after this call are delivered. Dropping the feed closes
    /// the window.
    fn subscribe(&self) -> MarketFeed;

    /// Posts the purchase command for `listing_id` and returns the posted message, which
    /// replies are correlated against.
    async fn request_purchase(&self, listing_id: &str) -> Result<MarketMessage, TransportError>;
}

/// Presses a button on a market bot message.
#[async_trait]
pub trait ActionInvoker: Send + Sync {
    async fn invoke(
        &self,
        message: &MarketMessage,
        action: &ActionHandle,
    ) -> Result<(), TransportError>;
}
