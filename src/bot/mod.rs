//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `router`: ordered dispatch of messages and inline button presses
//! - `dialogue_manager`: turns dialog transitions into replies
//! - `admin_forwarder`: formats and delivers submissions to the admin chat
//! - `messenger`: transport trait and its teloxide implementation
//! - `ui_builder`: creates keyboards and formats messages
//! - `commands`: slash commands and input classification
//! - `message_handler` / `callback_handler`: dispatcher endpoints

pub mod admin_forwarder;
pub mod callback_handler;
pub mod commands;
pub mod dialogue_manager;
pub mod message_handler;
pub mod messenger;
pub mod router;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use admin_forwarder::{AdminForwarder, ForwardOutcome, Sender, Submission};
pub use commands::Command;
pub use messenger::{DeliveryError, Messenger};
pub use router::{CallbackMessage, IncomingCallback, IncomingMessage, Router};
pub use ui_builder::Keyboard;
