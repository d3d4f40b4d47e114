//! TOML catalog manifest
//!
//! ```toml
//! [[clip]]
//! id = "protoss-zealot-ready"
//! audio = "tg:AwACAgIAAxk..."
//! en = "My life for Aiur!"
//! uk = "Моє життя за Айур!"
//! tags = ["protoss", "zealot"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AudioRef, Catalog, ClipRecord};
use crate::error::LoadError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "clip")]
    pub clips: Vec<ManifestClip>,
}

/// A clip as written in the manifest, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestClip {
    pub id: String,
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub uk: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Manifest {
    pub fn parse(raw: &str, origin: &str) -> Result<Self, LoadError> {
        toml::from_str(raw).map_err(|err| LoadError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, LoadError> {
        toml::to_string(self).map_err(|err| LoadError::Parse {
            origin: "manifest".to_string(),
            message: err.to_string(),
        })
    }

    /// Validate every clip and build the catalog.
    pub fn into_catalog(self) -> Result<Catalog, LoadError> {
        let mut records = Vec::with_capacity(self.clips.len());
        for (position, clip) in self.clips.into_iter().enumerate() {
            let id = clip.id.trim().to_string();
            if id.is_empty() {
                return Err(LoadError::EmptyId { position });
            }
            if clip.audio.trim().is_empty() {
                return Err(LoadError::MissingAudio { id });
            }
            let audio = AudioRef::parse(&clip.audio)
                .map_err(|reason| LoadError::InvalidAudio { id: id.clone(), reason })?;
            records.push(ClipRecord::new(id, audio, clip.en, clip.uk, clip.tags));
        }
        Catalog::from_records(records)
    }
}

/// Read, parse and validate a manifest file.
pub fn load(path: &Path) -> Result<Catalog, LoadError> {
    debug!(path = %path.display(), "reading catalog manifest");
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Manifest::parse(&raw, &path.display().to_string())?.into_catalog()?;
    info!(path = %path.display(), clips = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Parse and validate manifest text that did not come from a file.
pub fn from_toml_str(raw: &str) -> Result<Catalog, LoadError> {
    Manifest::parse(raw, "<inline>")?.into_catalog()
}
