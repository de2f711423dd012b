//! External command execution for Cadence.
//!
//! Every tool the release pipeline drives (`git`, the build wrapper, the pull
//! request tool) goes through this crate:
//! - [`RunMode`] decides whether commands really run
//! - [`CommandExecutor`] spawns them with inherited standard streams
//! - [`CommandRunner`] is the seam callers depend on

mod error;
mod executor;
mod mode;

pub use error::{ExecError, ExecResult};
pub use executor::{CommandExecutor, CommandResult, CommandRunner, capture, split_command};
pub use mode::RunMode;
