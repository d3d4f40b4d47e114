//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "sc-voice", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (replaces the global and project config files)
    #[arg(long, global = true, env = "SCV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog manifest (overrides catalog.path)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON output on stdout and JSON logs on stderr
    #[arg(long, global = true)]
    pub robot: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (long polling)
    Run(commands::run::RunArgs),

    /// Search the catalog the way inline queries do
    Search(commands::search::SearchArgs),

    /// Validate the catalog and print statistics
    Check(commands::check::CheckArgs),

    /// Print a catalog manifest skeleton for an audio directory
    Scaffold(commands::scaffold::ScaffoldArgs),

    /// Print the /start greeting
    Greeting,
}
