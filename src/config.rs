//! # Configuration
//!
//! Settings read once at startup from the environment (after `.env` has
//! been loaded by the binary).

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Contact handle used when `CREATOR_USERNAME` is not set
pub const DEFAULT_CREATOR_USERNAME: &str = "@MrCrabYT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: expected a number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Chat id or `@channel` receiving submissions; validated on delivery
    pub admin_destination: String,
    /// Handle quoted in purchase redirects
    pub creator_username: String,
    /// Idle sessions older than this fall back to the main menu
    pub session_idle_timeout: Option<Duration>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let admin_destination = required("ADMIN_CHAT_ID")?.trim().to_string();
        let creator_username = lookup("CREATOR_USERNAME")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CREATOR_USERNAME.to_string());

        let session_idle_timeout = match lookup("SESSION_IDLE_TIMEOUT_SECS") {
            Some(value) if !value.trim().is_empty() => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidTimeout {
                        name: "SESSION_IDLE_TIMEOUT_SECS",
                        value: value.clone(),
                    }
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            bot_token,
            admin_destination,
            creator_username,
            session_idle_timeout,
        })
    }
}
