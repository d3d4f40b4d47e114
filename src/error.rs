//! Error types for sc-voice

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, VoiceError>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] LoadError),

    #[error("telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VoiceError {
    /// Stable machine-readable code used in robot output
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::Catalog(_) => "catalog",
            Self::Telegram(_) => "telegram",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Malformed catalog data. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse catalog {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("clip #{position} has an empty id")]
    EmptyId { position: usize },

    #[error("clip id {id:?} is longer than {max} bytes")]
    IdTooLong { id: String, max: usize },

    #[error("duplicate clip id {id:?}")]
    DuplicateId { id: String },

    #[error("clip {id:?} has no audio reference")]
    MissingAudio { id: String },

    #[error("clip {id:?} has an invalid audio reference: {reason}")]
    InvalidAudio { id: String, reason: String },

    #[error("clip {id:?} has neither an English nor a Ukrainian label")]
    Unlabeled { id: String },

    #[error("clip {id:?} has a {language} label with no searchable words: {label:?}")]
    UnsearchableLabel {
        id: String,
        language: &'static str,
        label: String,
    },

    #[error("scan audio directory {path}: {message}")]
    Scan { path: PathBuf, message: String },
}
