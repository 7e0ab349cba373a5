//! Conversion of gateway messages into market messages.

use serenity::all::{ActionRowComponent, ButtonKind, Message};

use crate::model::market::{ActionHandle, MarketMessage};

impl From<&Message> for MarketMessage {
    fn from(message: &Message) -> Self {
        let actions = message
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .filter_map(|component| match component {
                ActionRowComponent::Button(button) => match &button.data {
                    ButtonKind::NonLink { custom_id, .. } => Some(ActionHandle {
                        id: custom_id.clone(),
                        label: button.label.clone().unwrap_or_default(),
                    }),
                    _ => None,
                },
                _ => None,
            })
            .collect();

        Self {
            id: message.id.get(),
            content: message.content.clone(),
            reply_to: message
                .message_reference
                .as_ref()
                .and_then(|reference| reference.message_id)
                .map(|id| id.get()),
            actions,
        }
    }
}
