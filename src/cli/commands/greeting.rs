//! sc-voice greeting - Print the /start text

use crate::cli::Cli;
use crate::error::Result;

pub fn run_without_context(cli: &Cli) -> Result<()> {
    let config = crate::app::load_config(cli)?;
    println!("{}", config.bot.greeting_text());
    Ok(())
}
