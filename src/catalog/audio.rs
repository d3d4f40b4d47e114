//! Audio references: how a clip's sound is delivered to Telegram

use std::fmt;
use std::path::{Component, Path};

use serde::{Serialize, Serializer};
use url::Url;

const FILE_ID_PREFIX: &str = "tg:";

/// Opaque handle to a clip's audio asset.
///
/// The core never touches audio bytes; the transport resolves the handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AudioRef {
    /// Telegram file id of an already uploaded voice message
    FileId(String),
    /// Publicly reachable audio URL
    Url(Url),
    /// Path relative to the configured media base URL
    Asset(String),
}

impl AudioRef {
    /// Parse the manifest form (`tg:<id>`, `https://...`, or a relative path).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("empty audio reference".to_string());
        }

        if let Some(file_id) = raw.strip_prefix(FILE_ID_PREFIX) {
            let file_id = file_id.trim();
            if file_id.is_empty() {
                return Err("empty Telegram file id".to_string());
            }
            return Ok(Self::FileId(file_id.to_string()));
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Url::parse(raw)
                .map(Self::Url)
                .map_err(|err| format!("malformed URL {raw}: {err}"));
        }

        if raw.contains("://") {
            return Err(format!("unsupported scheme in {raw}"));
        }

        let normalized = raw.replace('\\', "/");
        let path = Path::new(&normalized);
        if normalized.starts_with('/') || path.is_absolute() {
            return Err(format!("asset path {raw} must be relative"));
        }
        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(format!("asset path {raw} escapes the media root"));
        }

        Ok(Self::Asset(normalized))
    }

    /// URL the transport can fetch the voice from, if any.
    ///
    /// File ids return `None`: they are sent as cached voices instead.
    pub fn resolve_url(&self, base_url: Option<&Url>) -> Option<Url> {
        match self {
            Self::FileId(_) => None,
            Self::Url(url) => Some(url.clone()),
            Self::Asset(path) => {
                let base = base_url?;
                let base = if base.path().ends_with('/') {
                    base.clone()
                } else {
                    let mut with_slash = base.clone();
                    with_slash.set_path(&format!("{}/", base.path()));
                    with_slash
                };
                base.join(path).ok()
            }
        }
    }
}

impl fmt::Display for AudioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileId(id) => write!(f, "{FILE_ID_PREFIX}{id}"),
            Self::Url(url) => write!(f, "{url}"),
            Self::Asset(path) => write!(f, "{path}"),
        }
    }
}

impl Serialize for AudioRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
