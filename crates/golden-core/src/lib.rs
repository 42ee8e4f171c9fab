//! Golden file testing harness
//!
//! A test produces actual output from an input fixture and compares it
//! against a stored golden file (`<input><extension>`). In update mode the
//! actual output overwrites the golden file instead.
//!
//! - [`discovery`] walks a fixture directory and streams one [`Case`] per
//!   input file through a bounded channel
//! - [`case`] pairs an input with its golden file and runs checks in named
//!   sub-checks
//! - [`file`] reads, opens, splits and updates a single fixture file
//! - [`diff`] renders unified diffs with byte and line deltas
//! - [`report`] is the boundary to the host test runner

pub mod case;
pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod file;
pub mod report;

// Re-export commonly used types
pub use case::{Case, CaseCheck, CaseContext, Golden, Inspect};
pub use config::{DEFAULT_CHANNEL_SIZE, DEFAULT_EXTENSION, GoldenConfig};
pub use diff::{DiffLine, DiffReport, LineKind};
pub use discovery::{CaseStream, Discovery, RunSummary};
pub use error::{GoldenError, GoldenResult};
pub use file::{GoldenFile, split_sections};
pub use report::{CheckOutcome, CheckRecorder, Reporter, TracingReporter};
