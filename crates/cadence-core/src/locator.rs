//! Artifact lookup.
//!
//! Release artifacts are found by walking the project tree. In dry-run mode
//! the locator hands out shadow copies so every later edit lands in a
//! temporary file instead of the real tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cadence_exec::RunMode;
use tempfile::{NamedTempFile, TempPath};
use tracing::debug;

use crate::CoreResult;

/// Directories never searched for artifacts.
const SKIPPED_DIRS: &[&str] = &[".git"];

/// A located file, either the authoritative one or a dry-run shadow copy.
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    source: PathBuf,
    shadow: Option<Arc<TempPath>>,
}

impl Artifact {
    fn authoritative(path: PathBuf) -> Self {
        Self {
            source: path.clone(),
            path,
            shadow: None,
        }
    }

    fn shadow_of(source: PathBuf) -> CoreResult<Self> {
        let temp = NamedTempFile::with_prefix("cadence-")?;
        fs::copy(&source, temp.path())?;
        let temp = temp.into_temp_path();

        debug!(
            source = %source.display(),
            shadow = %temp.display(),
            "created shadow copy"
        );

        Ok(Self {
            path: temp.to_path_buf(),
            source,
            shadow: Some(Arc::new(temp)),
        })
    }

    /// The file to read and write.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file found in the project tree.
    ///
    /// Same as [`Artifact::path`] unless this is a shadow copy.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns true if edits go to a disposable copy.
    #[must_use]
    pub fn is_shadow_copy(&self) -> bool {
        self.shadow.is_some()
    }
}

/// Finds artifacts under a root directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLocator {
    mode: RunMode,
}

impl ArtifactLocator {
    /// Creates a new locator.
    #[must_use]
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// The mode this locator was created with.
    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Finds the first file named `filename` (case-insensitive) under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dry-run shadow copy cannot be created.
    pub fn find(&self, root: &Path, filename: &str) -> CoreResult<Option<Artifact>> {
        self.find_matching(root, filename, |_| true)
    }

    /// Finds the first file named `filename` under `root` that satisfies
    /// `predicate`.
    ///
    /// The walk is depth-first with entries in name order, so repeated runs
    /// pick the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if a dry-run shadow copy cannot be created.
    pub fn find_matching<P>(
        &self,
        root: &Path,
        filename: &str,
        predicate: P,
    ) -> CoreResult<Option<Artifact>>
    where
        P: Fn(&Path) -> bool,
    {
        let Some(found) = locate(root, filename, &predicate) else {
            debug!(root = %root.display(), filename, "artifact not found");
            return Ok(None);
        };

        debug!(path = %found.display(), "located artifact");

        let artifact = if self.mode.is_dry_run() {
            Artifact::shadow_of(found)?
        } else {
            Artifact::authoritative(found)
        };
        Ok(Some(artifact))
    }
}

/// Walks `root` and returns the real path of the first match.
pub(crate) fn locate(
    root: &Path,
    filename: &str,
    predicate: &dyn Fn(&Path) -> bool,
) -> Option<PathBuf> {
    if root.is_file() {
        return is_candidate(root, filename, predicate).then(|| root.to_path_buf());
    }

    let mut entries: Vec<PathBuf> = match fs::read_dir(root) {
        Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
        Err(e) => {
            debug!(dir = %root.display(), error = %e, "skipping unreadable directory");
            return None;
        }
    };
    entries.sort();

    for path in entries {
        if path.is_dir() {
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SKIPPED_DIRS.contains(&n));
            if skipped {
                continue;
            }
            if let Some(found) = locate(&path, filename, predicate) {
                return Some(found);
            }
        } else if is_candidate(&path, filename, predicate) {
            return Some(path);
        }
    }

    None
}

fn is_candidate(path: &Path, filename: &str, predicate: &dyn Fn(&Path) -> bool) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(filename))
        && predicate(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_find_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let real = write(temp_dir.path(), "CHANGELOG.md", "# Changelog\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        let artifact = locator
            .find(temp_dir.path(), "changelog.md")
            .unwrap()
            .unwrap();

        assert_eq!(artifact.path(), real);
        assert_eq!(artifact.source(), real);
        assert!(!artifact.is_shadow_copy());
    }

    #[test]
    fn test_find_nested() {
        let temp_dir = TempDir::new().unwrap();
        let real = write(temp_dir.path(), "library/gradle.properties", "A=1\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        let artifact = locator
            .find(temp_dir.path(), "gradle.properties")
            .unwrap()
            .unwrap();

        assert_eq!(artifact.path(), real);
    }

    #[test]
    fn test_find_with_predicate() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a/gradle.properties", "GROUP=com.example\n");
        let wanted = write(temp_dir.path(), "b/gradle.properties", "VERSION_NAME=1.0.0\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        let artifact = locator
            .find_matching(temp_dir.path(), "gradle.properties", |p| {
                fs::read_to_string(p).is_ok_and(|t| t.contains("VERSION_NAME"))
            })
            .unwrap()
            .unwrap();

        assert_eq!(artifact.path(), wanted);
    }

    #[test]
    fn test_find_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let first = write(temp_dir.path(), "a/changelog.md", "a\n");
        write(temp_dir.path(), "b/changelog.md", "b\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        for _ in 0..3 {
            let artifact = locator
                .find(temp_dir.path(), "changelog.md")
                .unwrap()
                .unwrap();
            assert_eq!(artifact.path(), first);
        }
    }

    #[test]
    fn test_find_skips_git_dir() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), ".git/changelog.md", "internal\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        assert!(
            locator
                .find(temp_dir.path(), "changelog.md")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_find_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let real = write(temp_dir.path(), "CHANGELOG.md", "# Changelog\n");

        let locator = ArtifactLocator::new(RunMode::Normal);
        let artifact = locator.find(&real, "changelog.md").unwrap().unwrap();
        assert_eq!(artifact.path(), real);

        assert!(locator.find(&real, "other.md").unwrap().is_none());
    }

    #[test]
    fn test_find_missing() {
        let temp_dir = TempDir::new().unwrap();
        let locator = ArtifactLocator::new(RunMode::Normal);
        assert!(
            locator
                .find(temp_dir.path(), "changelog.md")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_find_missing_root() {
        let locator = ArtifactLocator::new(RunMode::Normal);
        let result = locator.find(Path::new("/nonexistent/cadence/root"), "changelog.md");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_dry_run_returns_shadow_copy() {
        let temp_dir = TempDir::new().unwrap();
        let real = write(temp_dir.path(), "changelog.md", "# Changelog\n");

        let locator = ArtifactLocator::new(RunMode::DryRun);
        let artifact = locator
            .find(temp_dir.path(), "changelog.md")
            .unwrap()
            .unwrap();

        assert!(artifact.is_shadow_copy());
        assert_ne!(artifact.path(), real);
        assert_eq!(artifact.source(), real);
        assert_eq!(fs::read_to_string(artifact.path()).unwrap(), "# Changelog\n");

        fs::write(artifact.path(), "edited\n").unwrap();
        assert_eq!(fs::read_to_string(&real).unwrap(), "# Changelog\n");
    }

    #[test]
    fn test_shadow_copy_removed_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "changelog.md", "# Changelog\n");

        let locator = ArtifactLocator::new(RunMode::DryRun);
        let artifact = locator
            .find(temp_dir.path(), "changelog.md")
            .unwrap()
            .unwrap();
        let shadow = artifact.path().to_path_buf();
        let clone = artifact.clone();

        drop(artifact);
        assert!(shadow.exists());
        drop(clone);
        assert!(!shadow.exists());
    }
}
