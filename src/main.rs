use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crabmine_bot::bot::{self, Command, Router};
use crabmine_bot::config::BotConfig;
use crabmine_bot::localization::init_localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting CrabMine Telegram Bot");

    let config = BotConfig::from_env().context("Failed to load configuration")?;
    init_localization();

    let bot = Bot::new(config.bot_token.clone());

    let me = bot.get_me().await.context("Failed to reach the Telegram Bot API")?;
    info!(username = %me.username(), "Bot authenticated");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let router = Arc::new(Router::new(bot.clone(), &config, me.username()));

    // Abandoned dialogs are otherwise only reset when their user writes again
    if let Some(timeout) = config.session_idle_timeout {
        let router = router.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(timeout.max(Duration::from_secs(60)));
            loop {
                ticker.tick().await;
                let purged = router.sessions().purge_expired();
                if purged > 0 {
                    debug!(purged, "Purged expired sessions");
                }
            }
        });
    }

    info!(
        idle_timeout = ?config.session_idle_timeout,
        "Bot initialized, starting dispatcher"
    );

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(bot::message_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
