//! sc-voice scaffold - Print a catalog skeleton for an audio directory

use std::path::PathBuf;

use clap::Args;

use crate::catalog::scaffold::scaffold;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ScaffoldArgs {
    /// Directory containing .ogg/.wav files (subdirectories become tags)
    pub dir: PathBuf,
}

/// Needs no config or catalog, so it runs before the app context exists
pub fn run_without_context(args: &ScaffoldArgs) -> Result<()> {
    let manifest = scaffold(&args.dir)?;
    print!("{}", manifest.to_toml()?);
    Ok(())
}
