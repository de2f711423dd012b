//! Effective settings of a run.
//!
//! A command-line flag wins over `cadence.toml`, which wins over the
//! built-in default.

use cadence_config::Config;

use crate::commands::release::ReleaseArgs;

/// Everything a release run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub version_file: String,
    pub version_key: String,
    pub changelog_file: String,
    pub remote: String,
    pub tag_prefix: String,
    pub publish_wrapper: String,
    pub publish_task: String,
    pub ticket: String,
    pub ticket_url: Option<String>,
    pub labels: Vec<String>,
    pub pr_tool: String,
}

impl Settings {
    /// Merges command-line arguments over the loaded configuration.
    pub fn resolve(args: &ReleaseArgs, config: Config) -> Self {
        let tag_prefix = if args.no_tag_prefix {
            String::new()
        } else {
            args.tag_prefix.clone().unwrap_or(config.git.tag_prefix)
        };

        let labels = if args.labels.is_empty() {
            config.pull_request.labels
        } else {
            args.labels.clone()
        };

        Self {
            version_file: config.version.file,
            version_key: config.version.key,
            changelog_file: args.changelog.clone().unwrap_or(config.changelog.file),
            remote: config.git.remote,
            tag_prefix,
            publish_wrapper: config.publish.wrapper,
            publish_task: args
                .publish_task_name
                .clone()
                .unwrap_or(config.publish.task),
            ticket: args.ticket.clone().unwrap_or(config.pull_request.ticket),
            ticket_url: config.pull_request.ticket_url,
            labels,
            pr_tool: config.pull_request.tool,
        }
    }
}
