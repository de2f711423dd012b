//! Configuration management for Cadence.
//!
//! This crate handles loading the optional `cadence.toml` file that supplies
//! project defaults for the release pipeline.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config_from, find_config_file, load_config};
pub use schema::{
    ChangelogConfig, Config, GitConfig, PublishConfig, PullRequestConfig, VersionConfig,
};
