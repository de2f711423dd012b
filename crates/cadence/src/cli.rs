//! CLI definition.

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Publish a library release, tag it and open a pull request bumping the version.
#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub release: commands::release::ReleaseArgs,
}

impl Cli {
    /// Runs the release.
    pub fn run(self) -> Result<()> {
        commands::release::run(&self.release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_are_unset() {
        let cli = Cli::try_parse_from(["cadence"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.release.dry_run);
        assert!(cli.release.ticket.is_none());
        assert!(cli.release.tag_prefix.is_none());
        assert!(cli.release.labels.is_empty());
    }

    #[test]
    fn test_labels_repeatable() {
        let cli =
            Cli::try_parse_from(["cadence", "--labels", "a", "b", "--labels", "c"]).unwrap();
        assert_eq!(cli.release.labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tag_prefix_conflict() {
        let result = Cli::try_parse_from(["cadence", "--tag-prefix", "r", "--no-tag-prefix"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }
}
