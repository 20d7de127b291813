//! Message Handler module: dispatcher endpoint for incoming messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error};

use super::admin_forwarder::Sender;
use super::router::{IncomingMessage, Router};

impl IncomingMessage {
    /// Extract routing data from a Telegram message; `None` when the
    /// message has no human sender (channel posts, service messages)
    pub fn from_message(msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;
        Some(Self {
            chat_id: msg.chat.id,
            sender: Sender {
                id: user.id,
                full_name: user.full_name(),
                username: user.username.clone(),
            },
            text: msg.text().map(str::to_string),
        })
    }
}

pub async fn message_handler(msg: Message, router: Arc<Router<Bot>>) -> Result<()> {
    let Some(incoming) = IncomingMessage::from_message(&msg) else {
        debug!(chat_id = %msg.chat.id, "Ignoring message without a sender");
        return Ok(());
    };

    let user_id = incoming.sender.id;
    // One failed update must not stop the dispatcher
    if let Err(e) = router.handle_message(incoming).await {
        error!(user_id = %user_id, error = %e, "Failed to handle message");
    }

    Ok(())
}
