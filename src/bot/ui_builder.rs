//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    ReplyMarkup,
};

use crate::catalog::{PrivilegeEntry, Role, CANCEL_LABEL, MAIN_MENU_LABELS, PRIVILEGES};
use crate::localization::{t, t_args};

/// Keyboard attached to an outgoing message, independent of the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the user currently has
    Unchanged,
    /// Persistent main-menu reply keyboard
    MainMenu,
    /// One-time role selection keyboard
    RoleChoice,
    /// Inline buttons, one per privilege
    Privileges,
    /// Hide the reply keyboard while collecting free text
    Remove,
}

/// Main menu as a persistent reply keyboard
pub fn create_main_menu_keyboard() -> KeyboardMarkup {
    let rows = MAIN_MENU_LABELS
        .iter()
        .map(|label| vec![KeyboardButton::new(*label)])
        .collect::<Vec<_>>();

    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Role choice keyboard with a trailing cancel button
pub fn create_role_keyboard() -> KeyboardMarkup {
    let mut rows = Role::ALL
        .iter()
        .map(|role| vec![KeyboardButton::new(role.label())])
        .collect::<Vec<_>>();
    rows.push(vec![KeyboardButton::new(CANCEL_LABEL)]);

    KeyboardMarkup::new(rows).resize_keyboard().one_time_keyboard()
}

/// Inline keyboard listing every privilege
pub fn create_privilege_keyboard() -> InlineKeyboardMarkup {
    let buttons = PRIVILEGES
        .iter()
        .map(|entry| vec![InlineKeyboardButton::callback(entry.label, entry.id)])
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Telegram markup for a keyboard choice
pub fn reply_markup(keyboard: Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Unchanged => None,
        Keyboard::MainMenu => Some(create_main_menu_keyboard().into()),
        Keyboard::RoleChoice => Some(create_role_keyboard().into()),
        Keyboard::Privileges => Some(create_privilege_keyboard().into()),
        Keyboard::Remove => Some(KeyboardRemove::new().into()),
    }
}

pub fn format_welcome() -> String {
    format!("{}\n{}", t("welcome"), t("welcome-hint"))
}

/// Selection reply replacing the privilege list
pub fn format_privilege_selection(entry: &PrivilegeEntry, creator_username: &str) -> String {
    format!(
        "{}\n\n{}",
        t_args("privilege-selected", &[("privilege", entry.label)]),
        t_args("privilege-contact", &[("creator", creator_username)])
    )
}

/// Copy-and-fill instructions followed by the role questionnaire
pub fn format_role_template(role: Role) -> String {
    format!(
        "{}\n\n{}\n{}\n{}\n{}\n\n{}\n\n{}",
        t_args("role-selected", &[("role", role.label())]),
        t("role-instructions"),
        t("role-step-copy"),
        t("role-step-fill"),
        t("role-step-send"),
        t("role-template-divider"),
        role.template()
    )
}
