//! Git error types.

use cadence_core::StepFailure;
use cadence_exec::ExecError;
use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// A git or pull request command failed.
    #[error("git error: {0}")]
    Command(#[from] ExecError),

    /// No pull request tool was configured.
    #[error("no pull request tool configured")]
    NoPullRequestTool,
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

impl From<GitError> for StepFailure {
    fn from(err: GitError) -> Self {
        Self::hard(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let err = GitError::from(ExecError::CommandFailed {
            command: "git push origin v1.0.0".to_string(),
            code: Some(1),
        });
        assert_eq!(
            err.to_string(),
            "git error: command `git push origin v1.0.0` exited with non-zero status 1"
        );
    }

    #[test]
    fn test_no_pr_tool_display() {
        assert_eq!(
            GitError::NoPullRequestTool.to_string(),
            "no pull request tool configured"
        );
    }

    #[test]
    fn test_step_failure_is_hard() {
        let failure = StepFailure::from(GitError::NoPullRequestTool);
        assert!(matches!(failure, StepFailure::Hard(_)));
    }

    #[test]
    fn test_error_is_debug() {
        let debug = format!("{:?}", GitError::NoPullRequestTool);
        assert!(debug.contains("NoPullRequestTool"));
    }
}
