//! Message Router: top-level dispatch of incoming updates.
//!
//! Text and command messages are matched against an ordered route table;
//! the first predicate that holds decides the handler. Inline button
//! presses are handled separately since they arrive as callback queries.

use anyhow::Result;
use teloxide::types::{CallbackQueryId, ChatId, MessageId, UserId};
use tracing::{debug, warn};

use crate::catalog::{find_privilege, BUY_PRIVILEGE_LABEL, PURCHASE_CALLBACK_SUFFIX};
use crate::config::BotConfig;
use crate::dialogue::{DialogInput, EntryPoint, Session};
use crate::localization::t;
use crate::session_store::SessionStore;

use super::admin_forwarder::{AdminForwarder, Sender};
use super::commands::{classify, Command, UserInput};
use super::dialogue_manager::run_dialog_effect;
use super::messenger::Messenger;
use super::ui_builder::{format_privilege_selection, Keyboard};

/// A text or command message, stripped of transport details
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub sender: Sender,
    /// `None` for stickers, photos and other non-text content
    pub text: Option<String>,
}

/// The message an inline button was attached to
#[derive(Debug, Clone, Copy)]
pub struct CallbackMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub has_inline_keyboard: bool,
}

/// An inline button press
#[derive(Debug, Clone)]
pub struct IncomingCallback {
    pub id: CallbackQueryId,
    pub user_id: UserId,
    pub data: Option<String>,
    pub message: Option<CallbackMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Restart,
    PrivilegeMenu,
    DialogEntry,
    ActiveDialog,
    Fallback,
}

/// What the route predicates can look at
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub input: UserInput<'a>,
    pub session_active: bool,
}

type RoutePredicate = fn(&RouteContext<'_>) -> bool;

/// Dispatch priority, first match wins
const MESSAGE_ROUTES: [(RoutePredicate, Route); 4] = [
    (is_restart, Route::Restart),
    (is_privilege_menu, Route::PrivilegeMenu),
    (is_dialog_entry, Route::DialogEntry),
    (has_active_session, Route::ActiveDialog),
];

fn is_restart(ctx: &RouteContext<'_>) -> bool {
    ctx.input == UserInput::Command(Command::Start)
}

fn is_privilege_menu(ctx: &RouteContext<'_>) -> bool {
    ctx.input == UserInput::Text(BUY_PRIVILEGE_LABEL)
}

fn is_dialog_entry(ctx: &RouteContext<'_>) -> bool {
    matches!(ctx.input, UserInput::Text(text) if EntryPoint::from_label(text).is_some())
}

fn has_active_session(ctx: &RouteContext<'_>) -> bool {
    ctx.session_active
}

pub fn select_route(ctx: &RouteContext<'_>) -> Route {
    MESSAGE_ROUTES
        .iter()
        .find(|(predicate, _)| predicate(ctx))
        .map(|(_, route)| *route)
        .unwrap_or(Route::Fallback)
}

/// Translate routed input into a state machine input
pub fn dialog_input(input: UserInput<'_>) -> DialogInput<'_> {
    match input {
        UserInput::Command(Command::Start) => DialogInput::Restart,
        UserInput::Command(Command::Cancel) => DialogInput::Cancel,
        UserInput::UnknownCommand => DialogInput::OtherCommand,
        UserInput::Text(text) => match EntryPoint::from_label(text) {
            Some(entry) => DialogInput::Entry(entry),
            None => DialogInput::Text(text),
        },
        UserInput::NonText => DialogInput::NonText,
    }
}

pub struct Router<M> {
    messenger: M,
    sessions: SessionStore,
    forwarder: AdminForwarder,
    creator_username: String,
    bot_username: String,
}

impl<M: Messenger> Router<M> {
    pub fn new(messenger: M, config: &BotConfig, bot_username: impl Into<String>) -> Self {
        Self {
            messenger,
            sessions: SessionStore::new(config.session_idle_timeout),
            forwarder: AdminForwarder::new(config.admin_destination.clone()),
            creator_username: config.creator_username.clone(),
            bot_username: bot_username.into(),
        }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one text or command message
    pub async fn handle_message(&self, message: IncomingMessage) -> Result<()> {
        let user_id = message.sender.id;
        let result = {
            // Held until the reply is out so the user's next update waits
            let mut session = self.sessions.lock(user_id).await;
            self.route_message(&mut session, &message).await
        };
        self.sessions.release_if_idle(user_id);
        result
    }

    async fn route_message(&self, session: &mut Session, message: &IncomingMessage) -> Result<()> {
        let input = classify(message.text.as_deref(), &self.bot_username);
        let route = select_route(&RouteContext {
            input,
            session_active: session.is_active(),
        });
        debug!(user_id = %message.sender.id, route = ?route, state = ?session.state(), "Routing message");

        match route {
            Route::PrivilegeMenu => {
                self.messenger
                    .send_text(message.chat_id.into(), t("privilege-choose"), Keyboard::Privileges)
                    .await?;
            }
            Route::Restart | Route::DialogEntry | Route::ActiveDialog => {
                let effect = session.apply(dialog_input(input));
                debug!(user_id = %message.sender.id, effect = ?effect, state = ?session.state(), "Dialog transition");
                run_dialog_effect(&self.messenger, &self.forwarder, message, effect).await?;
            }
            Route::Fallback => {
                self.messenger
                    .send_text(message.chat_id.into(), t("use-menu-buttons"), Keyboard::MainMenu)
                    .await?;
            }
        }

        Ok(())
    }

    /// Handle an inline button press
    pub async fn handle_callback(&self, callback: IncomingCallback) -> Result<()> {
        let data = callback.data.as_deref().unwrap_or("");
        debug!(user_id = %callback.user_id, data, "Received callback query");

        let selection = data
            .strip_suffix(PURCHASE_CALLBACK_SUFFIX)
            .and_then(|_| find_privilege(data));

        match (selection, callback.message) {
            (Some(entry), Some(message)) if message.has_inline_keyboard => {
                let text = format_privilege_selection(entry, &self.creator_username);
                if let Err(e) = self
                    .messenger
                    .replace_text(message.chat_id, message.message_id, text)
                    .await
                {
                    warn!(user_id = %callback.user_id, error = %e, "Failed to show privilege selection");
                }
            }
            (Some(_), _) => {
                // Buttons are already gone; a late press changes nothing
                debug!(user_id = %callback.user_id, "Ignoring press on a resolved privilege list");
            }
            (None, _) => {
                debug!(user_id = %callback.user_id, data, "Ignoring unknown callback");
            }
        }

        // Answer the callback query to remove the loading state
        self.messenger.answer_callback(callback.id).await?;

        Ok(())
    }
}
