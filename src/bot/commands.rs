//! Slash commands and classification of raw message text

use teloxide::utils::command::BotCommands;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "показать главное меню")]
    Start,
    #[command(description = "отменить текущее действие")]
    Cancel,
}

/// A message reduced to what routing needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput<'a> {
    Command(Command),
    /// Any other slash command, including ones addressed to another bot
    UnknownCommand,
    Text(&'a str),
    NonText,
}

/// Classify message text. Arguments after a command (deep-link payloads)
/// are ignored.
pub fn classify<'a>(text: Option<&'a str>, bot_username: &str) -> UserInput<'a> {
    let Some(text) = text else {
        return UserInput::NonText;
    };

    if !text.starts_with('/') {
        return UserInput::Text(text);
    }

    let head = text.split_whitespace().next().unwrap_or(text);
    match Command::parse(head, bot_username) {
        Ok(command) => UserInput::Command(command),
        Err(_) => UserInput::UnknownCommand,
    }
}
