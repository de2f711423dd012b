//! Tool availability checks run before a release.

use std::path::Path;

use anyhow::{Result, bail};
use cadence_exec::{capture, split_command};
use tracing::{debug, error};

use crate::settings::Settings;

/// Verifies the publish wrapper, `git` and the pull request tool.
///
/// Every check runs; all failures are reported before giving up.
///
/// # Errors
///
/// Returns an error if any check fails.
pub fn check(root: &Path, settings: &Settings) -> Result<()> {
    let failures = problems(root, settings);
    for problem in &failures {
        error!("{problem}");
        println!("Preflight: {problem}");
    }

    if !failures.is_empty() {
        bail!("{} preflight check(s) failed", failures.len());
    }
    debug!("preflight checks passed");
    Ok(())
}

fn problems(root: &Path, settings: &Settings) -> Vec<String> {
    let mut problems = Vec::new();

    if let Some(wrapper) = split_command(&settings.publish_wrapper).first()
        && is_path(wrapper)
        && !root.join(wrapper).is_file()
    {
        problems.push(format!(
            "publish wrapper {wrapper} not found in {}",
            root.display()
        ));
    }

    if let Err(e) = capture(&["git", "--version"], root) {
        problems.push(format!("git is not available: {e}"));
    }

    match split_command(&settings.pr_tool).first() {
        Some(tool) => {
            if let Err(e) = capture(&[tool.as_str(), "--version"], root) {
                problems.push(format!("pull request tool {tool} is not available: {e}"));
            }
        }
        None => problems.push("no pull request tool configured".to_string()),
    }

    problems
}

fn is_path(program: &str) -> bool {
    program.contains('/') || program.contains('\\')
}
