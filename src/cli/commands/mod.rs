//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

pub mod check;
pub mod greeting;
pub mod run;
pub mod scaffold;
pub mod search;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

/// Dispatch a command that needs the loaded catalog
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
        Commands::Scaffold(_) | Commands::Greeting => Ok(()),
    }
}
