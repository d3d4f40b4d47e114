use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VoiceError};
use crate::search::{EmptyQuery, QueryOptions};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "sc-voice.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Defaults, then config files, then `SCV_*` environment overrides.
    ///
    /// An explicit path (argument or `SCV_CONFIG`) replaces the global and
    /// project files instead of layering on top of them.
    pub fn load(explicit_path: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SCV_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(VoiceError::MissingConfig(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_dir.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML document over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| VoiceError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("sc-voice/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| VoiceError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| VoiceError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.catalog {
            self.catalog.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.bot {
            self.bot.merge(patch);
        }
        if let Some(patch) = patch.media {
            self.media.merge(patch);
        }
    }

    /// Apply `SCV_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SCV_CATALOG") {
            self.catalog.path = PathBuf::from(value);
        }

        if let Some(value) = lookup("SCV_SEARCH_LIMIT") {
            self.search.limit = parse_usize("SCV_SEARCH_LIMIT", &value)?;
        }
        if let Some(value) = lookup("SCV_SEARCH_EMPTY_QUERY") {
            self.search.empty_query = value
                .parse()
                .map_err(|err| VoiceError::Config(format!("invalid SCV_SEARCH_EMPTY_QUERY: {err}")))?;
        }

        // BOT_TOKEN is what most deployments of Telegram bots already export
        if let Some(value) = lookup("SCV_BOT_TOKEN").or_else(|| lookup("BOT_TOKEN")) {
            self.bot.token = Some(value);
        }
        if let Some(value) = lookup("SCV_BOT_CACHE_TIME") {
            self.bot.cache_time = parse_u32("SCV_BOT_CACHE_TIME", &value)?;
        }
        if let Some(value) = lookup("SCV_BOT_GREETING") {
            self.bot.greeting = Some(value);
        }

        if let Some(value) = lookup("SCV_MEDIA_BASE_URL") {
            self.media.base_url = Some(value);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.limit == 0 {
            return Err(VoiceError::Config("search.limit must be at least 1".to_string()));
        }
        self.media.parsed_base_url()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML manifest with the clip list
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl CatalogConfig {
    fn merge(&mut self, patch: CatalogPatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.toml")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub empty_query: EmptyQuery,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            empty_query: EmptyQuery::default(),
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.limit {
            self.limit = value;
        }
        if let Some(value) = patch.empty_query {
            self.empty_query = value;
        }
    }

    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            limit: self.limit,
            empty_query: self.empty_query,
        }
    }
}

const fn default_limit() -> usize {
    crate::search::query::DEFAULT_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Token from BotFather
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Seconds Telegram may cache a non-empty inline answer
    #[serde(default = "default_cache_time")]
    pub cache_time: u32,
    /// Replaces the built-in `/start` text
    #[serde(default)]
    pub greeting: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            cache_time: default_cache_time(),
            greeting: None,
        }
    }
}

impl BotConfig {
    fn merge(&mut self, patch: BotPatch) {
        if let Some(value) = patch.token {
            self.token = Some(value);
        }
        if let Some(value) = patch.cache_time {
            self.cache_time = value;
        }
        if let Some(value) = patch.greeting {
            self.greeting = Some(value);
        }
    }

    /// The `/start` text: the configured greeting, or the built-in one
    pub fn greeting_text(&self) -> &str {
        self.greeting
            .as_deref()
            .unwrap_or(crate::search::query::DEFAULT_GREETING)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                VoiceError::MissingConfig(
                    "bot token not set (bot.token, SCV_BOT_TOKEN or BOT_TOKEN)".to_string(),
                )
            })
    }
}

const fn default_cache_time() -> u32 {
    300
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Base URL that relative asset paths in the catalog are joined onto
    #[serde(default)]
    pub base_url: Option<String>,
}

impl MediaConfig {
    fn merge(&mut self, patch: MediaPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = Some(value);
        }
    }

    pub fn parsed_base_url(&self) -> Result<Option<Url>> {
        let Some(raw) = self.base_url.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let url = Url::parse(raw)
            .map_err(|err| VoiceError::Config(format!("invalid media.base_url {raw}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VoiceError::Config(format!(
                "media.base_url {raw} must be http or https"
            )));
        }
        Ok(Some(url))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub catalog: Option<CatalogPatch>,
    pub search: Option<SearchPatch>,
    pub bot: Option<BotPatch>,
    pub media: Option<MediaPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogPatch {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub limit: Option<usize>,
    pub empty_query: Option<EmptyQuery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BotPatch {
    pub token: Option<String>,
    pub cache_time: Option<u32>,
    pub greeting: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MediaPatch {
    pub base_url: Option<String>,
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|err| VoiceError::Config(format!("invalid {key} value {value}: {err}")))
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|err| VoiceError::Config(format!("invalid {key} value {value}: {err}")))
}
