//! Pipeline module.
//!
//! Orchestrates loader, profiler, transformer and writer, with optional
//! progress reporting.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder, PipelineOutput};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, WranglingStage};
