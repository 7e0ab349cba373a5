//! HTTP client for the market automation relay.
//!
//! The relay is an external service that acts as the paying market account: it posts the
//! purchase command in the market channel and presses buttons on the market bot's replies.
//! Both endpoints take JSON and authenticate with a bearer token; any 2xx status counts
//! as success.

use serde::{Deserialize, Serialize};
use serenity::async_trait;

use crate::{
    error::transport::TransportError,
    market::{ActionInvoker, MarketFeed, MarketHub, MarketTransport},
    model::market::{ActionHandle, MarketMessage},
};

#[derive(Debug, Serialize)]
struct PostMessageBody<'a> {
    channel_id: String,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    id: String,
}

#[derive(Debug, Serialize)]
struct InteractionBody<'a> {
    channel_id: String,
    message_id: String,
    custom_id: &'a str,
}

/// Market transport backed by the automation relay and the gateway hub.
#[derive(Clone)]
pub struct MarketRelay {
    client: reqwest::Client,
    base_url: String,
    token: String,
    channel_id: u64,
    market_bot_id: u64,
    hub: MarketHub,
}

impl MarketRelay {
    /// Creates a relay client.
    ///
    /// # Arguments
    /// - `client` - Shared HTTP client
    /// - `base_url` - Relay base URL, without trailing slash
    /// - `token` - Bearer token for the relay
    /// - `channel_id` - Market channel the purchase command is posted in
    /// - `market_bot_id` - Discord ID of the market bot, mentioned in the command
    /// - `hub` - Gateway fan-out the replies arrive through
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        channel_id: u64,
        market_bot_id: u64,
        hub: MarketHub,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            channel_id,
            market_bot_id,
            hub,
        }
    }

    /// Builds the market bot's buy command for a listing.
    pub fn purchase_command(&self, listing_id: &str) -> String {
        format!("<@{}> m b {}", self.market_bot_id, listing_id)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::RelayRejected {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl MarketTransport for MarketRelay {
    fn subscribe(&self) -> MarketFeed {
        self.hub.subscribe()
    }

    async fn request_purchase(&self, listing_id: &str) -> Result<MarketMessage, TransportError> {
        let content = self.purchase_command(listing_id);
        let body = PostMessageBody {
            channel_id: self.channel_id.to_string(),
            content: &content,
        };

        let posted: PostedMessage = self
            .post("purchase request", "messages", &body)
            .await?
            .json()
            .await?;

        let id = posted
            .id
            .parse::<u64>()
            .map_err(|_| TransportError::InvalidResponse(format!("message id '{}'", posted.id)))?;

        tracing::debug!("Posted purchase command {} for listing {}", id, listing_id);

        Ok(MarketMessage {
            id,
            content,
            reply_to: None,
            actions: Vec::new(),
        })
    }
}

#[async_trait]
impl ActionInvoker for MarketRelay {
    async fn invoke(
        &self,
        message: &MarketMessage,
        action: &ActionHandle,
    ) -> Result<(), TransportError> {
        let body = InteractionBody {
            channel_id: self.channel_id.to_string(),
            message_id: message.id.to_string(),
            custom_id: &action.id,
        };

        self.post("button press", "interactions", &body).await?;

        Ok(())
    }
}
