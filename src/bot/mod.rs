//! Telegram adapter
//!
//! Inline queries go straight to the [`QueryHandler`]; `/start`, `/help`
//! and `/stats` answer from static text and catalog statistics. The bot
//! keeps no state besides the immutable handler, so updates are processed
//! concurrently without locks.

pub mod handlers;
pub mod render;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::search::QueryHandler;

use self::handlers::Command;

/// Transport settings resolved from config
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub cache_time: u32,
    pub base_url: Option<Url>,
}

impl BotSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            cache_time: config.bot.cache_time,
            base_url: config.media.parsed_base_url()?,
        })
    }
}

/// Shared by every handler invocation
pub struct BotState {
    pub handler: Arc<QueryHandler>,
    pub settings: BotSettings,
}

/// Authenticate, then long-poll until Ctrl-C.
pub async fn run(token: String, handler: Arc<QueryHandler>, settings: BotSettings) -> Result<()> {
    info!("Starting Telegram bot");
    let bot = Bot::new(token);

    match bot.get_me().await {
        Ok(me) => info!("Bot authenticated as: @{}", me.username()),
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            return Err(e.into());
        }
    }

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        error!("Failed to register bot commands: {}", e);
    }

    let state = Arc::new(BotState { handler, settings });

    let command_handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handlers::handle_command);

    let inline_query_handler =
        Update::filter_inline_query().endpoint(handlers::handle_inline_query);

    let all_handlers = dptree::entry()
        .branch(command_handler)
        .branch(inline_query_handler);

    info!("Bot initialized, starting dispatcher...");
    Dispatcher::builder(bot, all_handlers)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram bot stopped");
    Ok(())
}
