//! Error types for configuration and script loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the simulation core (file I/O and validation).
#[derive(Error, Debug)]
pub enum EffectsError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EffectsError>;
