//! Error types for settings persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to load configuration from {path}")]
    LoadPath {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to save configuration to {path}")]
    SavePath {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}
