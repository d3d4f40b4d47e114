//! sc-voice run - Start the Telegram bot

use clap::Args;

use crate::app::AppContext;
use crate::bot;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Worker threads for the async runtime (defaults to the CPU count)
    #[arg(long)]
    pub workers: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let token = ctx.config.bot.require_token()?.to_string();
    let settings = bot::BotSettings::from_config(&ctx.config)?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = args.workers {
        builder.worker_threads(workers.max(1));
    }
    let runtime = builder.build()?;

    runtime.block_on(bot::run(token, ctx.handler.clone(), settings))
}
