//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No property file under the root holds the version key.
    #[error("couldn't find a {file} file that contains {key} under {}", root.display())]
    PropertyFileNotFound {
        file: String,
        key: String,
        root: PathBuf,
    },

    /// The property file exists but has no `key = value` line.
    #[error("couldn't find {key} in {}", path.display())]
    KeyNotFound { key: String, path: PathBuf },

    /// The last version component is not an integer.
    #[error("malformed version '{0}': last component must be an integer")]
    MalformedVersion(String),

    /// The changelog could not be located.
    #[error("could not find '{0}' changelog file")]
    ChangelogMissing(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns false for failures the release can tolerate.
    ///
    /// Only a missing changelog is tolerated.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ChangelogMissing(_))
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
