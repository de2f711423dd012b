//! CLI commands.

pub mod release;
