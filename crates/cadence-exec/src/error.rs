//! Command execution error types.

use thiserror::Error;

/// Command execution errors.
#[derive(Debug, Error)]
pub enum ExecError {
    /// No tokens were given.
    #[error("cannot run an empty command")]
    EmptyCommand,

    /// The process could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("command `{command}` exited with {}", describe_code(*.code))]
    CommandFailed { command: String, code: Option<i32> },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("non-zero status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result type for command execution.
pub type ExecResult<T> = Result<T, ExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_display() {
        assert_eq!(
            ExecError::EmptyCommand.to_string(),
            "cannot run an empty command"
        );
    }

    #[test]
    fn test_command_failed_display() {
        let err = ExecError::CommandFailed {
            command: "git push origin v1.0.0".to_string(),
            code: Some(128),
        };
        assert_eq!(
            err.to_string(),
            "command `git push origin v1.0.0` exited with non-zero status 128"
        );
    }

    #[test]
    fn test_command_killed_display() {
        let err = ExecError::CommandFailed {
            command: "hub pull-request".to_string(),
            code: None,
        };
        assert_eq!(
            err.to_string(),
            "command `hub pull-request` exited with no status (terminated by signal)"
        );
    }

    #[test]
    fn test_spawn_display() {
        let err = ExecError::Spawn {
            command: "missing-tool".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to start `missing-tool`: not found");
    }
}
