//! Release tag and pull request flow.

use std::path::{Path, PathBuf};

use cadence_exec::CommandRunner;
use tracing::{debug, info};

use crate::{GitError, GitResult};

/// Remote pushed to unless configured otherwise.
pub const DEFAULT_REMOTE: &str = "origin";

/// Prefix of release tags unless configured otherwise.
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Pull request command unless configured otherwise.
pub const DEFAULT_PR_TOOL: &str = "hub pull-request";

const PR_FOOTER: &str = "This PR was created automatically by Cadence.";

/// Runs the git commands of a release in one repository.
pub struct ReleaseGit<'a, R: CommandRunner> {
    runner: &'a R,
    repo_path: PathBuf,
    remote: String,
    tag_prefix: String,
    ticket_url: Option<String>,
    pr_tool: Vec<String>,
}

impl<'a, R: CommandRunner> ReleaseGit<'a, R> {
    /// Creates an adapter for the repository at `repo_path`.
    #[must_use]
    pub fn new(runner: &'a R, repo_path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            repo_path: repo_path.into(),
            remote: DEFAULT_REMOTE.to_string(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            ticket_url: None,
            pr_tool: DEFAULT_PR_TOOL.split_whitespace().map(String::from).collect(),
        }
    }

    /// Sets the remote to push to.
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Sets the release tag prefix. An empty prefix tags the bare version.
    #[must_use]
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Sets a ticket link template, `{ticket}` being replaced by the ticket id.
    #[must_use]
    pub fn with_ticket_url(mut self, template: impl Into<String>) -> Self {
        self.ticket_url = Some(template.into());
        self
    }

    /// Sets the pull request command, e.g. `["hub", "pull-request"]`.
    #[must_use]
    pub fn with_pr_tool(mut self, tokens: Vec<String>) -> Self {
        self.pr_tool = tokens;
        self
    }

    /// Repository the commands run in.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Tag name for `version`.
    #[must_use]
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{version}", self.tag_prefix)
    }

    /// Branch holding the bump to `version`.
    #[must_use]
    pub fn branch_name(version: &str, ticket: &str) -> String {
        format!("{ticket}-increment-version-to-{version}")
    }

    /// Tags the current commit with `version` and pushes the tag.
    ///
    /// # Errors
    ///
    /// Returns an error if `git tag` or `git push` fails.
    pub fn create_and_push_tag(&self, version: &str) -> GitResult<()> {
        let tag = self.tag_name(version);

        self.git(&["tag", &tag])?;
        self.git(&["push", &self.remote, &tag])?;

        info!(%tag, remote = %self.remote, "Pushed release tag");
        Ok(())
    }

    /// Commits `files` on a new branch, pushes it and opens a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if no pull request tool is configured or any of the
    /// commands fails. Commands after the failing one are not run.
    pub fn create_branch_commit_and_pull_request(
        &self,
        version: &str,
        ticket: &str,
        files: &[&Path],
        labels: &[String],
    ) -> GitResult<()> {
        let Some((tool, tool_args)) = self.pr_tool.split_first() else {
            return Err(GitError::NoPullRequestTool);
        };
        let branch = Self::branch_name(version, ticket);
        let title = commit_title(version);

        self.git(&["checkout", "-b", &branch])?;

        let mut add = vec!["add".to_string()];
        add.extend(files.iter().map(|file| file.display().to_string()));
        self.run(&prefixed("git", &add))?;

        self.git(&[
            "commit",
            "-m",
            &title,
            "-m",
            &format!("Ticket: {ticket}"),
        ])?;
        self.git(&["push", &self.remote, &branch])?;
        self.git(&["remote", "set-head", &self.remote, "-a"])?;

        let mut pull_request = vec![tool.clone()];
        pull_request.extend(tool_args.iter().cloned());
        pull_request.push("-m".to_string());
        pull_request.push(self.pull_request_body(version, ticket));
        if !labels.is_empty() {
            pull_request.push("-l".to_string());
            pull_request.push(labels.join(","));
        }
        self.run(&pull_request)?;

        info!(%branch, "Opened pull request");
        Ok(())
    }

    /// Message of the pull request for `version`.
    #[must_use]
    pub fn pull_request_body(&self, version: &str, ticket: &str) -> String {
        let reference = match &self.ticket_url {
            Some(template) => {
                format!("Ticket: [{ticket}]({})", template.replace("{ticket}", ticket))
            }
            None => format!("Ticket: {ticket}"),
        };
        format!("{}\n\n{reference}\n\n{PR_FOOTER}", commit_title(version))
    }

    fn git(&self, args: &[&str]) -> GitResult<()> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
        self.run(&prefixed("git", &args))
    }

    fn run(&self, tokens: &[String]) -> GitResult<()> {
        let result = self.runner.run(tokens, &self.repo_path)?;
        debug!(?result, "command finished");
        Ok(())
    }
}

fn commit_title(version: &str) -> String {
    format!("Prepare next version {version}")
}

fn prefixed(program: &str, args: &[String]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(args.len() + 1);
    tokens.push(program.to_string());
    tokens.extend(args.iter().cloned());
    tokens
}
