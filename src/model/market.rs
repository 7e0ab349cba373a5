//! Messages observed from the market bot.

/// Button label the orchestrator presses to accept a verified purchase.
pub const CONFIRM_LABEL: &str = "Confirm";

/// An interactive component attached to a market message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHandle {
    /// Component custom id
    pub id: String,
    /// Visible button label
    pub label: String,
}

/// A message in the market channel, either our purchase request or a market bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketMessage {
    /// Discord message ID
    pub id: u64,
    /// Raw message content
    pub content: String,
    /// ID of the message this one replies to, if any
    pub reply_to: Option<u64>,
    /// Buttons offered on the message
    pub actions: Vec<ActionHandle>,
}

impl MarketMessage {
    /// Whether this message is a reply to `request`.
    pub fn correlates_to(&self, request: &MarketMessage) -> bool {
        self.reply_to == Some(request.id)
    }

    /// Finds the action with the given label.
    pub fn action(&self, label: &str) -> Option<&ActionHandle> {
        self.actions.iter().find(|action| action.label == label)
    }
}
