//! Sequential pipeline runner.
//!
//! One runner executes every pipeline. It walks the step list in order and,
//! for each step:
//!
//! 1. checks that every declared input exists,
//! 2. executes the step (filesystem work here, pixel work on the backend),
//! 3. reports what happened to the observer.
//!
//! The first failure ends the run. Nothing is rolled back: outputs written
//! by earlier steps stay on disk, and re-running is always safe because each
//! run starts by cleaning its outputs.

use crate::artifacts::{self, ArtifactError};
use crate::imaging::{BackendError, ImageBackend};
use crate::steps::Step;
use std::path::PathBuf;
use thiserror::Error;

/// A named, ordered list of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Every path some step in this pipeline produces, in step order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.steps.iter().flat_map(Step::outputs).collect()
    }
}

#[derive(Error, Debug)]
pub enum StepError {
    #[error("missing input {}", .0.display())]
    MissingInput(PathBuf),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Error, Debug)]
#[error("{pipeline}: step {} ({step}) failed: {source}", .index + 1)]
pub struct PipelineError {
    pub pipeline: String,
    /// Zero-based position of the failing step.
    pub index: usize,
    /// Display form of the failing step.
    pub step: String,
    #[source]
    pub source: StepError,
}

/// What a finished step did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub index: usize,
    pub label: &'static str,
    pub description: String,
    /// Files removed by `clean`/`remove` steps.
    pub removed: Vec<PathBuf>,
    /// Files created or overwritten.
    pub produced: Vec<PathBuf>,
}

/// Progress notifications emitted while a pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    PipelineStarted { name: String, steps: usize },
    StepStarted { index: usize, description: String },
    StepFinished(StepOutcome),
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub pipeline: String,
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    /// All files produced by the run, in step order.
    pub fn produced(&self) -> Vec<PathBuf> {
        self.steps
            .iter()
            .flat_map(|s| s.produced.iter().cloned())
            .collect()
    }

    pub fn removed_count(&self) -> usize {
        self.steps.iter().map(|s| s.removed.len()).sum()
    }
}

/// Run `pipeline` on `backend`, reporting progress to `observer`.
pub fn run_with_backend(
    pipeline: &Pipeline,
    backend: &impl ImageBackend,
    mut observer: impl FnMut(&StepEvent),
) -> Result<RunReport, PipelineError> {
    tracing::info!(pipeline = %pipeline.name, steps = pipeline.steps.len(), "pipeline started");
    observer(&StepEvent::PipelineStarted {
        name: pipeline.name.clone(),
        steps: pipeline.steps.len(),
    });

    let mut outcomes = Vec::with_capacity(pipeline.steps.len());
    for (index, step) in pipeline.steps.iter().enumerate() {
        let description = step.to_string();
        observer(&StepEvent::StepStarted {
            index,
            description: description.clone(),
        });
        tracing::debug!(pipeline = %pipeline.name, index, %description, "step started");

        let removed = execute_step(step, backend).map_err(|source| {
            tracing::debug!(pipeline = %pipeline.name, index, %description, error = %source, "step failed");
            PipelineError {
                pipeline: pipeline.name.clone(),
                index,
                step: description.clone(),
                source,
            }
        })?;

        let outcome = StepOutcome {
            index,
            label: step.label(),
            description,
            removed,
            produced: step.outputs(),
        };
        observer(&StepEvent::StepFinished(outcome.clone()));
        outcomes.push(outcome);
    }

    Ok(RunReport {
        pipeline: pipeline.name.clone(),
        steps: outcomes,
    })
}

/// Check preconditions and perform one step. Returns removed paths.
///
/// Besides the step's own work, this creates the parent directory of every
/// declared output, so the first run works in a fresh checkout.
fn execute_step(step: &Step, backend: &impl ImageBackend) -> Result<Vec<PathBuf>, StepError> {
    if let Some(missing) = step.inputs().into_iter().find(|p| !p.exists()) {
        return Err(StepError::MissingInput(missing));
    }
    for output in step.outputs() {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(ArtifactError::from)?;
        }
    }

    match step {
        Step::Clean { dir, extensions } => Ok(artifacts::clean_stale(dir, extensions)?),
        Step::Remove { path } => {
            let removed = artifacts::remove_if_exists(path)?;
            Ok(if removed { vec![path.clone()] } else { Vec::new() })
        }
        Step::Convert(params) => {
            backend.convert(params)?;
            Ok(Vec::new())
        }
        Step::Resize(params) => {
            backend.resize(params)?;
            Ok(Vec::new())
        }
        Step::Alias { target, link } => {
            artifacts::create_alias(target, link)?;
            Ok(Vec::new())
        }
        Step::Capture(params) => {
            backend.capture(params)?;
            Ok(Vec::new())
        }
    }
}
