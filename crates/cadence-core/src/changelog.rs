//! Changelog editing.
//!
//! The changelog is a markdown file whose first two lines are a title and a
//! blank line, followed by sections headed `## Version <v> *(<status>)*`.
//! The status is either [`DEVELOPMENT_MARKER`] or a `YYYY-MM-DD` release
//! date.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::locator::ArtifactLocator;
use crate::text::{read_lines, write_lines};
use crate::{Artifact, CoreError, CoreResult};

/// Status of a version that has not been released yet.
pub const DEVELOPMENT_MARKER: &str = "In development";

/// Line index where new sections go, right after the title and blank line.
const SECTION_INSERT_INDEX: usize = 2;

static DEVELOPMENT_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+Version\s+(\S+)\s+\*\(In development\)\*").expect("invalid regex")
});

/// Formats a section heading.
#[must_use]
pub fn version_heading(version: &str, status: &str) -> String {
    format!("## Version {version} *({status})*")
}

/// Edits the changelog file, if there is one.
#[derive(Debug)]
pub struct ChangelogEditor {
    filename: String,
    artifact: Option<Artifact>,
}

impl ChangelogEditor {
    /// Locates `filename` (case-insensitive) under `root`.
    ///
    /// A missing changelog is not an error here; the edits report it.
    ///
    /// # Errors
    ///
    /// Returns an error if a dry-run shadow copy cannot be created.
    pub fn load(locator: &ArtifactLocator, root: &Path, filename: &str) -> CoreResult<Self> {
        let artifact = locator.find(root, filename)?;
        if artifact.is_none() {
            warn!(filename, "changelog not found, changelog steps will be skipped");
        }

        Ok(Self {
            filename: filename.to_string(),
            artifact,
        })
    }

    /// The changelog file, if one was found.
    #[must_use]
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Replaces the development marker of `version` with `date`.
    ///
    /// Only the first matching heading changes. Without a matching heading
    /// the file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChangelogMissing`] if there is no changelog, or an
    /// IO error if it cannot be rewritten.
    pub fn stamp_release_date(&self, version: &str, date: &str) -> CoreResult<()> {
        let artifact = self.require()?;
        let mut lines = read_lines(artifact.path())?;

        let fragment = format!("Version {version} *({DEVELOPMENT_MARKER})*");
        let Some(line) = lines.iter_mut().find(|line| line.contains(&fragment)) else {
            debug!(version, "no development heading to stamp");
            return Ok(());
        };
        *line = line.replacen(DEVELOPMENT_MARKER, date, 1);

        write_lines(artifact.path(), &lines)?;
        info!(
            "Set date {date} for version {version} in {} changelog file",
            self.filename
        );
        Ok(())
    }

    /// Inserts an empty development section for `version` below the title.
    ///
    /// The changelog must start with a one-line title followed by a blank
    /// line; this is not checked. Files shorter than that get the section
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChangelogMissing`] if there is no changelog, or an
    /// IO error if it cannot be rewritten.
    pub fn add_new_version_section(&self, version: &str) -> CoreResult<()> {
        let artifact = self.require()?;
        let mut lines = read_lines(artifact.path())?;

        let pending = development_versions_in(&lines);
        if !pending.is_empty() {
            warn!(?pending, "changelog already has versions in development");
        }

        let at = SECTION_INSERT_INDEX.min(lines.len());
        lines.splice(
            at..at,
            [
                String::new(),
                version_heading(version, DEVELOPMENT_MARKER),
                String::new(),
            ],
        );

        write_lines(artifact.path(), &lines)?;
        info!("Added version {version} to {} changelog file", self.filename);
        Ok(())
    }

    /// Versions whose heading carries the development marker, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChangelogMissing`] if there is no changelog, or an
    /// IO error if it cannot be read.
    pub fn development_versions(&self) -> CoreResult<Vec<String>> {
        let artifact = self.require()?;
        Ok(development_versions_in(&read_lines(artifact.path())?))
    }

    fn require(&self) -> CoreResult<&Artifact> {
        self.artifact
            .as_ref()
            .ok_or_else(|| CoreError::ChangelogMissing(self.filename.clone()))
    }
}

fn development_versions_in(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| DEVELOPMENT_HEADING.captures(line))
        .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
