//! Transport seam between the router and Telegram.
//!
//! The router only talks to [`Messenger`]; the teloxide [`Bot`] is the
//! production implementation and tests plug in a recording double.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, MessageId, ParseMode, Recipient};
use thiserror::Error;

use super::ui_builder::{reply_markup, Keyboard};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid destination {0:?}: expected a chat id or @channel")]
    InvalidDestination(String),
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send an HTML-formatted message
    async fn send_text(
        &self,
        to: Recipient,
        text: String,
        keyboard: Keyboard,
    ) -> Result<(), DeliveryError>;

    /// Replace a message's text and drop its inline keyboard
    async fn replace_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
    ) -> Result<(), DeliveryError>;

    /// Stop the loading indicator on a pressed inline button
    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), DeliveryError>;
}

#[async_trait]
impl Messenger for Bot {
    async fn send_text(
        &self,
        to: Recipient,
        text: String,
        keyboard: Keyboard,
    ) -> Result<(), DeliveryError> {
        let request = self.send_message(to, text).parse_mode(ParseMode::Html);
        match reply_markup(keyboard) {
            Some(markup) => request.reply_markup(markup).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn replace_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
    ) -> Result<(), DeliveryError> {
        // No reply_markup on the edit removes the inline keyboard
        self.edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), DeliveryError> {
        self.answer_callback_query(callback_id).await?;
        Ok(())
    }
}

/// Parse the configured admin destination
pub fn parse_destination(raw: &str) -> Result<Recipient, DeliveryError> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }

    let is_channel = raw
        .strip_prefix('@')
        .is_some_and(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if is_channel {
        return Ok(Recipient::ChannelUsername(raw.to_string()));
    }

    Err(DeliveryError::InvalidDestination(raw.to_string()))
}
