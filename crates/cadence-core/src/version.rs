//! Version property file.
//!
//! The release version lives on a single `KEY=value` line of a property
//! file. The store reads it once, derives the next development version and
//! writes that back when asked.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::locator::{ArtifactLocator, locate};
use crate::text::{read_lines, write_lines};
use crate::{Artifact, CoreError, CoreResult};

/// Reads and bumps the version stored in a property file.
#[derive(Debug)]
pub struct VersionStore {
    artifact: Artifact,
    key: String,
    current: String,
    next: String,
}

impl VersionStore {
    /// Locates the property file named `filename` under `root` that contains
    /// `key` and reads the version from it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No such file exists under `root`
    /// - The file has no `key = value` line
    /// - The version's last component is not an integer
    /// - The file cannot be read
    pub fn load(
        locator: &ArtifactLocator,
        root: &Path,
        filename: &str,
        key: &str,
    ) -> CoreResult<Self> {
        let artifact = locator.find_matching(root, filename, |path| {
            fs::read_to_string(path).is_ok_and(|text| text.contains(key))
        })?;

        let Some(artifact) = artifact else {
            // A file by that name without the key is a different mistake.
            return Err(match locate(root, filename, &|_| true) {
                Some(path) => CoreError::KeyNotFound {
                    key: key.to_string(),
                    path,
                },
                None => CoreError::PropertyFileNotFound {
                    file: filename.to_string(),
                    key: key.to_string(),
                    root: root.to_path_buf(),
                },
            });
        };

        let lines = read_lines(artifact.path())?;
        let pattern = key_pattern(key);
        let current = lines
            .iter()
            .find_map(|line| pattern.captures(line))
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().trim().to_string())
            .ok_or_else(|| CoreError::KeyNotFound {
                key: key.to_string(),
                path: artifact.source().to_path_buf(),
            })?;

        let next = bump_version(&current)?;
        debug!(%current, %next, path = %artifact.source().display(), "loaded version");

        Ok(Self {
            artifact,
            key: key.to_string(),
            current,
            next,
        })
    }

    /// The version about to be released.
    #[must_use]
    pub fn current_version(&self) -> &str {
        &self.current
    }

    /// The version for the next development cycle.
    #[must_use]
    pub fn next_version(&self) -> &str {
        &self.next
    }

    /// The property key holding the version.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The property file.
    #[must_use]
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Writes the next version to the key's line.
    ///
    /// Every other line is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be rewritten or no longer holds
    /// the key.
    pub fn commit(&self) -> CoreResult<()> {
        let mut lines = read_lines(self.artifact.path())?;
        let pattern = key_pattern(&self.key);

        let line = lines
            .iter_mut()
            .find(|line| pattern.is_match(line))
            .ok_or_else(|| CoreError::KeyNotFound {
                key: self.key.clone(),
                path: self.artifact.source().to_path_buf(),
            })?;
        *line = format!("{}={}", self.key, self.next);

        write_lines(self.artifact.path(), &lines)?;
        info!(version = %self.next, "Set version to {}", self.next);
        Ok(())
    }
}

fn key_pattern(key: &str) -> Regex {
    Regex::new(&format!(r"^\s*{}\s*=(.*)$", regex::escape(key)))
        .expect("escaped key is a valid regex")
}

/// Increments the last dot-delimited component of `version`.
///
/// All other components are kept verbatim.
///
/// # Errors
///
/// Returns [`CoreError::MalformedVersion`] if the last component is not a
/// non-negative integer.
pub fn bump_version(version: &str) -> CoreResult<String> {
    let malformed = || CoreError::MalformedVersion(version.to_string());

    let (head, last) = match version.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, version),
    };

    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let next = last
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(malformed)?;

    Ok(match head {
        Some(head) => format!("{head}.{next}"),
        None => next.to_string(),
    })
}
