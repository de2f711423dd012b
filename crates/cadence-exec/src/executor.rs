//! Process spawning.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::{ExecError, ExecResult, RunMode};

/// Outcome of a command that actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code reported by the process.
    pub code: i32,
}

/// Runs external commands.
///
/// Implementations return `Ok(None)` when the command was not spawned
/// (dry run) and an error when it ran and failed.
pub trait CommandRunner {
    /// Runs `tokens` in `working_dir`, the first token being the executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits unsuccessfully.
    fn run(&self, tokens: &[String], working_dir: &Path) -> ExecResult<Option<CommandResult>>;

    /// The mode this runner was created with.
    fn mode(&self) -> RunMode;
}

/// Spawns real processes, or only logs them in dry-run mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandExecutor {
    mode: RunMode,
}

impl CommandExecutor {
    /// Creates a new executor.
    #[must_use]
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }
}

impl CommandRunner for CommandExecutor {
    fn run(&self, tokens: &[String], working_dir: &Path) -> ExecResult<Option<CommandResult>> {
        let (program, args) = tokens.split_first().ok_or(ExecError::EmptyCommand)?;
        let command = tokens.join(" ");
        info!(dir = %working_dir.display(), "$ {command}");

        if self.mode.is_dry_run() {
            info!(%command, "dry run, command not executed");
            return Ok(None);
        }

        // Credential prompts need the terminal
        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        match status.code() {
            Some(0) => Ok(Some(CommandResult { code: 0 })),
            code => Err(ExecError::CommandFailed { command, code }),
        }
    }

    fn mode(&self) -> RunMode {
        self.mode
    }
}

/// Runs a command and returns its trimmed standard output.
///
/// Ignores the run mode, so only use it for read-only commands.
///
/// # Errors
///
/// Returns an error if the command cannot be started or exits unsuccessfully.
pub fn capture(tokens: &[&str], working_dir: &Path) -> ExecResult<String> {
    let (program, args) = tokens.split_first().ok_or(ExecError::EmptyCommand)?;
    let command = tokens.join(" ");

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ExecError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExecError::CommandFailed {
            command,
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Splits a command line on whitespace.
///
/// No quoting rules; configured commands are plain words.
#[must_use]
pub fn split_command(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}
