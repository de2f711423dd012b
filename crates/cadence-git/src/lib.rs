//! Git side of a Cadence release.
//!
//! This crate drives the system `git` and pull request tool through a
//! [`CommandRunner`](cadence_exec::CommandRunner):
//! - Release tag creation and push
//! - Version bump branch, commit and push
//! - Pull request creation

mod error;
mod release;

pub use error::{GitError, GitResult};
pub use release::{DEFAULT_PR_TOOL, DEFAULT_REMOTE, DEFAULT_TAG_PREFIX, ReleaseGit};
