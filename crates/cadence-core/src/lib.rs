//! Core library for Cadence.
//!
//! This crate provides the release step pipeline and the editors for the two
//! artifacts a release touches: the version property file and the changelog.

mod changelog;
mod error;
mod locator;
mod pipeline;
mod text;
mod version;

pub use changelog::{ChangelogEditor, DEVELOPMENT_MARKER, version_heading};
pub use error::{CoreError, CoreResult};
pub use locator::{Artifact, ArtifactLocator};
pub use pipeline::{
    BoxError, Pipeline, PipelineAborted, PipelineReport, ReportEntry, StepFailure, StepResult,
    StepState,
};
pub use version::{VersionStore, bump_version};
pub use cadence_exec::RunMode;
