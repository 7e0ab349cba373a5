use tokio::sync::broadcast;

use crate::model::market::MarketMessage;

/// Messages buffered per subscriber before the slowest one starts lagging.
const FEED_CAPACITY: usize = 64;

/// Fan-out of market bot messages observed on the gateway.
///
/// The gateway handler publishes every message the market bot posts in the market
/// channel; each in-flight claim holds its own `MarketFeed`.
#[derive(Clone)]
pub struct MarketHub {
    sender: broadcast::Sender<MarketMessage>,
}

impl MarketHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    /// Delivers a message to every open feed. Without subscribers the message is dropped.
    pub fn publish(&self, message: MarketMessage) {
        let _ = self.sender.send(message);
    }

    pub fn subscribe(&self) -> MarketFeed {
        MarketFeed {
            receiver: self.sender.subscribe(),
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MarketHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One listening window on the market bot's messages.
pub struct MarketFeed {
    receiver: broadcast::Receiver<MarketMessage>,
}

impl MarketFeed {
    /// Waits for the next message.
    ///
    /// Cancel safe. Returns `None` once the hub is gone. If this feed fell behind, the
    /// skipped messages are logged and the feed resumes at the oldest retained one.
    pub async fn next(&mut self) -> Option<MarketMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Market feed lagged, skipped {} messages", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
