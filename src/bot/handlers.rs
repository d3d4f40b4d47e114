//! Update handlers wired into the dispatcher

use std::sync::Arc;

use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{InlineQuery, Me};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, warn};

use super::BotState;
use super::render::{help_text, inline_results, stats_text};

/// Cache time for answers with no results, so corrected queries show up fast
pub const EMPTY_CACHE_TIME: u32 = 1;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Commands:")]
pub enum Command {
    #[command(description = "greeting and usage")]
    Start,
    #[command(description = "greeting and usage")]
    Help,
    #[command(description = "clip statistics")]
    Stats,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    me: Me,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    debug!(chat = msg.chat.id.0, ?cmd, "command received");

    let text = match cmd {
        Command::Start | Command::Help => help_text(state.handler.start(), me.username()),
        Command::Stats => stats_text(state.handler.catalog()),
    };

    let chat_id = msg.chat.id;
    if let Err(e) = with_flood_retry("send_message", || {
        bot.send_message(chat_id, text.clone()).into_future()
    })
    .await
    {
        error!("Failed to reply to {:?} in chat {}: {}", cmd, chat_id.0, e);
    }

    Ok(())
}

pub async fn handle_inline_query(
    bot: Bot,
    query: InlineQuery,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let text = query.query.trim();
    let hits = state.handler.search(text);
    let results = inline_results(
        &hits,
        query.from.language_code.as_deref(),
        state.settings.base_url.as_ref(),
    );
    debug!(
        user = query.from.id.0,
        query = text,
        hits = hits.len(),
        results = results.len(),
        "inline query answered"
    );

    let cache_time = if results.is_empty() {
        EMPTY_CACHE_TIME
    } else {
        state.settings.cache_time
    };

    if let Err(e) = with_flood_retry("answer_inline_query", || {
        let mut req = bot.answer_inline_query(query.id.clone(), results.clone());
        req.cache_time = Some(cache_time);
        req.is_personal = Some(true);
        req.into_future()
    })
    .await
    {
        error!("Failed to answer inline query {}: {}", query.id, e);
    }

    Ok(())
}

/// Run a request, and once more after the delay Telegram asks for on flood
/// control. Any other error is returned as is.
pub async fn with_flood_retry<F, Fut, T>(what: &str, mut request: F) -> ResponseResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ResponseResult<T>>,
{
    match request().await {
        Err(RequestError::RetryAfter(secs)) => {
            let wait = secs.duration();
            warn!("Flood control on '{}': retry after {:?}", what, wait);
            tokio::time::sleep(wait).await;
            request().await
        }
        other => other,
    }
}
