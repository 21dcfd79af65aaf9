//! CLI output formatting for pipeline runs and plans.
//!
//! # Step-First Display
//!
//! Every line leads with the step's positional index and its one-line
//! description. Files removed or produced are shown as indented context, by
//! file name, so the output reads as an inventory of what changed.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! logo (6 steps)
//!     001 clean *.png *.svg in res/logo
//!         removed: old.png
//!     002 cp437-to-png logo.ans > logo.png
//!         logo.png
//!     ...
//! logo: 6 steps, 5 files written, 1 removed
//! ```
//!
//! ## Plan
//!
//! ```text
//! logo (6 steps)
//!     001 clean *.png *.svg in res/logo
//!     002 cp437-to-png logo.ans > logo.png
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::pipeline::{Pipeline, RunReport, StepEvent};
use std::path::Path;

/// Format a zero-based step index as a 1-based, 3-digit zero-padded position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn pipeline_header(name: &str, steps: usize) -> String {
    let noun = if steps == 1 { "step" } else { "steps" };
    format!("{name} ({steps} {noun})")
}

// ============================================================================
// Plan
// ============================================================================

/// Format the step list of a pipeline without running it.
pub fn format_plan(pipeline: &Pipeline) -> Vec<String> {
    let mut lines = vec![pipeline_header(&pipeline.name, pipeline.steps.len())];
    for (index, step) in pipeline.steps.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(index), step));
    }
    lines
}

pub fn print_plan(pipeline: &Pipeline) {
    for line in format_plan(pipeline) {
        println!("{}", line);
    }
}

// ============================================================================
// Run
// ============================================================================

/// Format a single progress event as display lines.
///
/// `StepStarted` produces nothing; the step is printed once it finishes so
/// its removed and produced files can follow it.
pub fn format_step_event(event: &StepEvent) -> Vec<String> {
    match event {
        StepEvent::PipelineStarted { name, steps } => vec![pipeline_header(name, *steps)],
        StepEvent::StepStarted { .. } => Vec::new(),
        StepEvent::StepFinished(outcome) => {
            let mut lines = vec![format!(
                "{}{} {}",
                indent(1),
                format_index(outcome.index),
                outcome.description
            )];
            for path in &outcome.removed {
                lines.push(format!("{}removed: {}", indent(2), display_name(path)));
            }
            for path in &outcome.produced {
                lines.push(format!("{}{}", indent(2), display_name(path)));
            }
            lines
        }
    }
}

pub fn print_step_event(event: &StepEvent) {
    for line in format_step_event(event) {
        println!("{}", line);
    }
}

/// Format the one-line summary printed after a successful run.
pub fn format_report(report: &RunReport) -> Vec<String> {
    let written = report.produced().len();
    let files = if written == 1 { "file" } else { "files" };
    vec![format!(
        "{}: {} steps, {} {} written, {} removed",
        report.pipeline,
        report.steps.len(),
        written,
        files,
        report.removed_count()
    )]
}

pub fn print_report(report: &RunReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}
