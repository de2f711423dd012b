//! Release flow against a real git repository and bare remote.

use std::fs;
use std::path::Path;
use std::process::Command;

use cadence_exec::{CommandExecutor, RunMode, capture};
use cadence_git::ReleaseGit;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates a clone with one commit, pushed to a bare `origin`.
fn setup_repo_with_remote() -> (TempDir, TempDir) {
    let remote = TempDir::new().expect("failed to create temp dir");
    git(remote.path(), &["init", "--bare"]);

    let local = TempDir::new().expect("failed to create temp dir");
    let dir = local.path();
    git(dir, &["init"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "tag.gpgsign", "false"]);
    git(
        dir,
        &["remote", "add", "origin", remote.path().to_str().unwrap()],
    );

    fs::write(dir.join("gradle.properties"), "VERSION_NAME=1.0.0\n").unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "Initial commit"]);
    git(dir, &["push", "origin", "HEAD"]);

    (local, remote)
}

#[test]
fn test_tag_pushed_with_prefix() {
    let (local, remote) = setup_repo_with_remote();
    let executor = CommandExecutor::new(RunMode::Normal);
    let release = ReleaseGit::new(&executor, local.path());

    release.create_and_push_tag("1.0.0").unwrap();

    assert_eq!(capture(&["git", "tag"], remote.path()).unwrap(), "v1.0.0");
}

#[test]
fn test_tag_pushed_without_prefix() {
    let (local, remote) = setup_repo_with_remote();
    let executor = CommandExecutor::new(RunMode::Normal);
    let release = ReleaseGit::new(&executor, local.path()).with_tag_prefix("");

    release.create_and_push_tag("1.0.0").unwrap();

    assert_eq!(capture(&["git", "tag"], remote.path()).unwrap(), "1.0.0");
}

#[test]
fn test_existing_tag_fails() {
    let (local, _remote) = setup_repo_with_remote();
    git(local.path(), &["tag", "v1.0.0"]);
    let executor = CommandExecutor::new(RunMode::Normal);
    let release = ReleaseGit::new(&executor, local.path());

    assert!(release.create_and_push_tag("1.0.0").is_err());
}

#[test]
fn test_dry_run_creates_no_tag() {
    let (local, remote) = setup_repo_with_remote();
    let executor = CommandExecutor::new(RunMode::DryRun);
    let release = ReleaseGit::new(&executor, local.path());

    release.create_and_push_tag("1.0.0").unwrap();

    assert_eq!(capture(&["git", "tag"], local.path()).unwrap(), "");
    assert_eq!(capture(&["git", "tag"], remote.path()).unwrap(), "");
}

#[test]
fn test_dry_run_pull_request_flow_changes_nothing() {
    let (local, _remote) = setup_repo_with_remote();
    let head = capture(&["git", "rev-parse", "HEAD"], local.path()).unwrap();
    let executor = CommandExecutor::new(RunMode::DryRun);
    let release = ReleaseGit::new(&executor, local.path());

    release
        .create_branch_commit_and_pull_request(
            "1.0.1",
            "ABC-1",
            &[Path::new("gradle.properties")],
            &["release".to_string()],
        )
        .unwrap();

    assert_eq!(
        capture(&["git", "rev-parse", "HEAD"], local.path()).unwrap(),
        head
    );
    assert_eq!(
        capture(&["git", "branch", "--list", "ABC-1-*"], local.path()).unwrap(),
        ""
    );
}
