use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the font catalog's file operations and lookups.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font `{0}` is not installed")]
    NotFound(String),

    #[error("font file missing at {}", .0.display())]
    MissingFile(PathBuf),

    #[error("only TTF and OTF files are supported, got `{0}`")]
    UnsupportedFormat(String),

    #[error("failed to {action} font: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: io::Error,
    },
}

impl FontError {
    pub(crate) fn io(action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| FontError::Io { action, source }
    }

    /// Lookup failures are recovered by committing plain text.
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, FontError::NotFound(_) | FontError::MissingFile(_))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings data: {0}")]
    Json(#[from] serde_json::Error),
}
