//! # ANSI Assets
//!
//! Regenerates the image assets of an ANSI-art rendering project: the logo
//! in several sizes, one swatch per colour scheme, and screenshots of the
//! reference documents as a browser draws them. Inputs are `.ans` sources
//! and reference files in the repository; outputs land next to them under
//! `res/`.
//!
//! # Architecture: Declarative Pipelines
//!
//! Each asset family is a pipeline: a named, ordered list of typed steps.
//!
//! ```text
//! 1. Build     AssetsConfig + root  →  Pipeline   (pure: only joins paths)
//! 2. Run       Pipeline + backend   →  RunReport  (one step at a time)
//! ```
//!
//! Steps communicate only through files. Every step declares the files it
//! reads and the files it writes, and the runner refuses to start a step
//! whose inputs are missing. Every pipeline starts by removing its own
//! previous outputs, so running twice leaves the same set of files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`assets`] | The logo, schemes and screenshots pipelines as step lists |
//! | [`steps`] | `Step` descriptors with declared inputs and outputs |
//! | [`pipeline`] | The sequential runner, progress events and run reports |
//! | [`artifacts`] | Cleanup, single-file removal and alias symlinks |
//! | [`imaging`] | Converter subprocesses, resizing and browser capture behind `ImageBackend` |
//! | [`config`] | Optional `assets.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting for plans and runs |
//! | [`telemetry`] | `tracing` subscriber setup for diagnostics on stderr |
//!
//! # Design Decisions
//!
//! ## External Tools Stay External
//!
//! The `.ans` renderers are this project's own binaries, so they are invoked
//! from the build directory rather than linked in. Resizing defaults to
//! ImageMagick for output identical to existing assets; the built-in engine
//! (the `image` crate, Lanczos3) removes that system dependency when exact
//! byte parity does not matter.
//!
//! ## Abort On First Failure
//!
//! A failed step ends the pipeline. Later steps almost always read what the
//! failed one should have written, and a clean re-run is always possible.

pub mod artifacts;
pub mod assets;
pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod steps;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_helpers;
