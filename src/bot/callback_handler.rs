//! Callback Handler module: dispatcher endpoint for inline keyboard presses

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MaybeInaccessibleMessage;
use tracing::error;

use super::router::{CallbackMessage, IncomingCallback, Router};

impl IncomingCallback {
    pub fn from_query(q: &CallbackQuery) -> Self {
        let message = q.message.as_ref().map(|m| CallbackMessage {
            chat_id: m.chat().id,
            message_id: m.id(),
            has_inline_keyboard: match m {
                MaybeInaccessibleMessage::Regular(msg) => msg
                    .reply_markup()
                    .is_some_and(|markup| !markup.inline_keyboard.is_empty()),
                MaybeInaccessibleMessage::Inaccessible(_) => false,
            },
        });

        Self {
            id: q.id.clone(),
            user_id: q.from.id,
            data: q.data.clone(),
            message,
        }
    }
}

pub async fn callback_handler(q: CallbackQuery, router: Arc<Router<Bot>>) -> Result<()> {
    let callback = IncomingCallback::from_query(&q);

    if let Err(e) = router.handle_callback(callback).await {
        error!(user_id = %q.from.id, error = %e, "Failed to handle callback query");
    }

    Ok(())
}
