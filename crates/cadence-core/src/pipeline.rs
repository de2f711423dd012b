//! Step pipeline execution.
//!
//! A pipeline is an ordered list of named steps run once, front to back.
//! Each step either succeeds, fails softly (logged, the run continues) or
//! fails hard (the run stops). A per-step report is printed at the end in
//! every case.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};

use cadence_exec::ExecError;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::CoreError;

/// Boxed cause of a fatal step failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Why a step did not succeed.
#[derive(Debug)]
pub enum StepFailure {
    /// Tolerated failure; the pipeline continues.
    Soft(String),
    /// Fatal failure; the pipeline stops.
    Hard(BoxError),
}

impl StepFailure {
    /// Creates a tolerated failure.
    pub fn soft(message: impl Into<String>) -> Self {
        Self::Soft(message.into())
    }

    /// Creates a fatal failure.
    pub fn hard(cause: impl Into<BoxError>) -> Self {
        Self::Hard(cause.into())
    }
}

impl From<CoreError> for StepFailure {
    fn from(err: CoreError) -> Self {
        if err.is_fatal() {
            Self::Hard(Box::new(err))
        } else {
            Self::Soft(err.to_string())
        }
    }
}

impl From<ExecError> for StepFailure {
    fn from(err: ExecError) -> Self {
        Self::Hard(Box::new(err))
    }
}

impl From<io::Error> for StepFailure {
    fn from(err: io::Error) -> Self {
        Self::Hard(Box::new(err))
    }
}

/// Result of a step action.
pub type StepResult = Result<(), StepFailure>;

/// Lifecycle of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Not run (yet).
    Pending,
    /// Currently executing.
    Running,
    /// Finished without error.
    Succeeded,
    /// Failed softly.
    FailedNonFatal,
    /// Failed and stopped the pipeline.
    FailedFatal,
}

impl StepState {
    /// Four-character marker used in the report.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Pending => "SKIP",
            Self::Running => "  ..",
            Self::Succeeded => "  OK",
            Self::FailedNonFatal => "WARN",
            Self::FailedFatal => "FAIL",
        }
    }
}

struct Step<'a> {
    description: String,
    action: Box<dyn FnMut() -> StepResult + 'a>,
    state: StepState,
}

/// Ordered steps, run once.
#[derive(Default)]
pub struct Pipeline<'a> {
    steps: Vec<Step<'a>>,
}

impl<'a> Pipeline<'a> {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step.
    pub fn step(
        &mut self,
        description: impl Into<String>,
        action: impl FnMut() -> StepResult + 'a,
    ) -> &mut Self {
        self.steps.push(Step {
            description: description.into(),
            action: Box::new(action),
            state: StepState::Pending,
        });
        self
    }

    /// Number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no step is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step and prints progress and the report to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineAborted`] carrying the cause of the first fatal
    /// failure.
    pub fn run(self) -> Result<PipelineReport, PipelineAborted> {
        self.run_with_output(&mut io::stdout().lock())
    }

    /// Runs every step, writing progress and the report to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineAborted`] carrying the cause of the first fatal
    /// failure.
    pub fn run_with_output(
        mut self,
        out: &mut impl Write,
    ) -> Result<PipelineReport, PipelineAborted> {
        let mut failure = None;

        for (index, step) in self.steps.iter_mut().enumerate() {
            emit(out, "");
            emit(out, &format!(">> Running step #{index} '{}'", step.description));
            info!(index, step = %step.description, "running step");

            step.state = StepState::Running;
            match (step.action)() {
                Ok(()) => step.state = StepState::Succeeded,
                Err(StepFailure::Soft(message)) => {
                    warn!(index, step = %step.description, "non-fatal failure: {message}");
                    emit(out, &format!("Non-fatal failure: {message}"));
                    step.state = StepState::FailedNonFatal;
                }
                Err(StepFailure::Hard(cause)) => {
                    error!(index, step = %step.description, "step failed: {cause}");
                    step.state = StepState::FailedFatal;
                    failure = Some((index, cause));
                    break;
                }
            }
        }

        let report = PipelineReport {
            entries: self
                .steps
                .into_iter()
                .map(|step| ReportEntry {
                    description: step.description,
                    state: step.state,
                })
                .collect(),
        };

        emit(out, "");
        emit(out, &report.to_string());

        match failure {
            Some((index, source)) => Err(PipelineAborted {
                index,
                description: report.entries[index].description.clone(),
                source,
                report,
            }),
            None => Ok(report),
        }
    }
}

fn emit(out: &mut impl Write, line: &str) {
    if let Err(e) = writeln!(out, "{line}") {
        warn!(error = %e, "failed to write pipeline output");
    }
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Step description.
    pub description: String,
    /// Final state.
    pub state: StepState,
}

/// Outcome of every registered step, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    entries: Vec<ReportEntry>,
}

impl PipelineReport {
    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Final state of each step.
    #[must_use]
    pub fn states(&self) -> Vec<StepState> {
        self.entries.iter().map(|e| e.state).collect()
    }

    /// Returns true if every step succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|e| e.state == StepState::Succeeded)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "#{index} {} {}", entry.state.marker(), entry.description)?;
        }
        Ok(())
    }
}

/// A fatal step failure, with the report of the aborted run.
#[derive(Debug, Error)]
#[error("step #{index} '{description}' failed")]
pub struct PipelineAborted {
    /// Index of the failed step.
    pub index: usize,
    /// Description of the failed step.
    pub description: String,
    #[source]
    source: BoxError,
    report: PipelineReport,
}

impl PipelineAborted {
    /// The report printed when the run stopped.
    #[must_use]
    pub fn report(&self) -> &PipelineReport {
        &self.report
    }

    /// The error raised by the failed step.
    #[must_use]
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Consumes the error, returning the step's original error.
    #[must_use]
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}
