//! Release command.

use std::path::Path;

use anyhow::{Context, Result};
use cadence_config::find_and_load_config_from;
use cadence_core::{
    ArtifactLocator, ChangelogEditor, Pipeline, PipelineReport, RunMode, VersionStore,
};
use cadence_exec::{CommandExecutor, CommandRunner, split_command};
use cadence_git::ReleaseGit;
use chrono::Local;
use clap::Args;
use tracing::info;

use crate::preflight;
use crate::settings::Settings;

/// Arguments for a release run.
#[derive(Debug, Default, Args)]
pub struct ReleaseArgs {
    /// Log commands and edit temporary copies instead of the real files
    #[arg(long)]
    pub dry_run: bool,

    /// Ticket referenced by the bump commit and pull request [default: NO-TICKET]
    #[arg(long)]
    pub ticket: Option<String>,

    /// Changelog file name, matched case-insensitively [default: changelog.md]
    #[arg(long)]
    pub changelog: Option<String>,

    /// Prefix of the release tag [default: v]
    #[arg(long, conflicts_with = "no_tag_prefix")]
    pub tag_prefix: Option<String>,

    /// Tag the bare version
    #[arg(long)]
    pub no_tag_prefix: bool,

    /// Labels added to the pull request
    #[arg(long, num_args = 1..)]
    pub labels: Vec<String>,

    /// Task that publishes the artifact [default: uploadArchives]
    #[arg(long)]
    pub publish_task_name: Option<String>,

    /// Check that the required tools are available before running
    #[arg(long)]
    pub preflight: bool,
}

/// Runs the release in the current directory.
pub fn run(args: &ReleaseArgs) -> Result<()> {
    let root = std::env::current_dir().context("failed to read current directory")?;
    let config = find_and_load_config_from(&root).context("failed to load configuration")?;
    let settings = Settings::resolve(args, config);
    let mode = RunMode::from_dry_run(args.dry_run);

    run_in(&root, &settings, mode, args.preflight).map(|_| ())
}

/// Loads the artifacts under `root` and runs the release steps.
pub fn run_in(
    root: &Path,
    settings: &Settings,
    mode: RunMode,
    check_tools: bool,
) -> Result<PipelineReport> {
    println!("Using ticket {}", settings.ticket);
    info!(%mode, root = %root.display(), "starting release");

    if check_tools {
        if mode.is_dry_run() {
            info!("dry run, preflight checks skipped");
        } else {
            preflight::check(root, settings).context("preflight checks failed")?;
        }
    }

    let locator = ArtifactLocator::new(mode);
    let versions = VersionStore::load(
        &locator,
        root,
        &settings.version_file,
        &settings.version_key,
    )
    .context("failed to load version")?;
    let changelog = ChangelogEditor::load(&locator, root, &settings.changelog_file)
        .context("failed to load changelog")?;

    let executor = CommandExecutor::new(mode);
    let mut git = ReleaseGit::new(&executor, root)
        .with_remote(&settings.remote)
        .with_tag_prefix(&settings.tag_prefix)
        .with_pr_tool(split_command(&settings.pr_tool));
    if let Some(url) = &settings.ticket_url {
        git = git.with_ticket_url(url);
    }

    let current = versions.current_version().to_string();
    let next = versions.next_version().to_string();
    let today = Local::now().format("%Y-%m-%d").to_string();
    println!("Releasing version {current}, next version will be {next}");

    let mut publish = split_command(&settings.publish_wrapper);
    publish.push(settings.publish_task.clone());

    let mut pipeline = Pipeline::new();
    pipeline
        .step("Upload artifact", || {
            executor.run(&publish, root)?;
            Ok(())
        })
        .step("Create and push release tag", || {
            git.create_and_push_tag(&current)?;
            Ok(())
        })
        .step(
            format!("Increment version in {}", settings.version_file),
            || {
                versions.commit()?;
                Ok(())
            },
        )
        .step("Update release date in changelog", || {
            changelog.stamp_release_date(&current, &today)?;
            Ok(())
        })
        .step("Add new version to changelog", || {
            changelog.add_new_version_section(&next)?;
            Ok(())
        })
        .step("Create commit and pull request", || {
            let mut files = vec![versions.artifact().source()];
            if let Some(artifact) = changelog.artifact() {
                files.push(artifact.source());
            }
            git.create_branch_commit_and_pull_request(
                &next,
                &settings.ticket,
                &files,
                &settings.labels,
            )?;
            Ok(())
        });

    let report = pipeline.run()?;
    info!(all_succeeded = report.all_succeeded(), "release finished");
    Ok(report)
}
