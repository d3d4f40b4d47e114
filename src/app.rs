use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::search::QueryHandler;

/// Everything a command needs: resolved config and the loaded catalog.
pub struct AppContext {
    pub config: Config,
    pub catalog_path: PathBuf,
    pub handler: Arc<QueryHandler>,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(cli)?;
        Self::from_config(config, cli.output_format())
    }

    /// Load the catalog named by `config` and build the search index.
    ///
    /// A malformed catalog is fatal here.
    pub fn from_config(config: Config, output_format: OutputFormat) -> Result<Self> {
        let catalog_path = config.catalog.path.clone();
        let catalog = Catalog::load(&catalog_path)?;

        let handler = QueryHandler::new(catalog, config.search.query_options())
            .with_greeting(config.bot.greeting_text());
        info!(
            clips = handler.catalog().len(),
            tokens = handler.index().token_count(),
            "search index ready"
        );

        Ok(Self {
            config,
            catalog_path,
            handler: Arc::new(handler),
            output_format,
        })
    }
}

/// Resolve config files, environment and CLI flags, in that order.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(cli.config.as_deref(), &cwd)?;
    if let Some(path) = &cli.catalog {
        config.catalog.path.clone_from(path);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(greeting: Option<&str>) -> AppContext {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            "[[clip]]\nid = \"1\"\naudio = \"tg:a\"\nen = \"Zealot Ready\"\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.catalog.path = path;
        config.bot.greeting = greeting.map(str::to_string);
        AppContext::from_config(config, OutputFormat::Human).unwrap()
    }

    #[test]
    fn test_handler_and_greeting_command_share_text() {
        for greeting in [None, Some("Hello, commander")] {
            let ctx = context(greeting);
            assert_eq!(ctx.handler.start(), ctx.config.bot.greeting_text());
        }
        assert_eq!(context(None).handler.start(), crate::search::query::DEFAULT_GREETING);
    }
}
