//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
///
/// Every field is optional in the file; command-line flags override these
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Version file configuration.
    #[serde(default)]
    pub version: VersionConfig,

    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Git configuration.
    #[serde(default)]
    pub git: GitConfig,

    /// Artifact publishing configuration.
    #[serde(default)]
    pub publish: PublishConfig,

    /// Version bump pull request configuration.
    #[serde(default)]
    pub pull_request: PullRequestConfig,
}

impl Config {
    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("version.file", &self.version.file),
            ("version.key", &self.version.key),
            ("changelog.file", &self.changelog.file),
            ("git.remote", &self.git.remote),
            ("publish.wrapper", &self.publish.wrapper),
            ("pull_request.tool", &self.pull_request.tool),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }

        if self.version.key.contains('=') {
            return Err(ConfigError::Invalid(
                "version.key must not contain '='".to_string(),
            ));
        }

        Ok(())
    }
}

/// Version file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Name of the property file holding the version.
    #[serde(default = "default_version_file")]
    pub file: String,

    /// Property key whose value is the version.
    #[serde(default = "default_version_key")]
    pub key: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            file: default_version_file(),
            key: default_version_key(),
        }
    }
}

fn default_version_file() -> String {
    "gradle.properties".to_string()
}

fn default_version_key() -> String {
    "VERSION_NAME".to_string()
}

/// Changelog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Changelog file name, matched case-insensitively.
    #[serde(default = "default_changelog_file")]
    pub file: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: default_changelog_file(),
        }
    }
}

fn default_changelog_file() -> String {
    "changelog.md".to_string()
}

/// Git configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote that receives tags and branches.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Tag prefix (e.g., "v"); empty for bare version tags.
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Artifact publishing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Build tool wrapper, relative to the project root.
    #[serde(default = "default_wrapper")]
    pub wrapper: String,

    /// Task passed to the wrapper.
    #[serde(default = "default_publish_task")]
    pub task: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            wrapper: default_wrapper(),
            task: default_publish_task(),
        }
    }
}

fn default_wrapper() -> String {
    "./gradlew".to_string()
}

fn default_publish_task() -> String {
    "uploadArchives".to_string()
}

/// Version bump pull request configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestConfig {
    /// Ticket referenced by the commit and pull request.
    #[serde(default = "default_ticket")]
    pub ticket: String,

    /// Link template for tickets, with a `{ticket}` placeholder.
    pub ticket_url: Option<String>,

    /// Labels added to the pull request.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Pull request command, without its arguments.
    #[serde(default = "default_pr_tool")]
    pub tool: String,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            ticket: default_ticket(),
            ticket_url: None,
            labels: Vec::new(),
            tool: default_pr_tool(),
        }
    }
}

fn default_ticket() -> String {
    "NO-TICKET".to_string()
}

fn default_pr_tool() -> String {
    "hub pull-request".to_string()
}
