//! Extraction runs: configuration, source discovery and the concurrent
//! per-file fan-out.
//!
//! # Error Handling Strategy
//!
//! - **Configuration errors** (empty file type, source path or output
//!   directory, no matching source files) are reported before any file is
//!   opened.
//! - **Record errors** are handled by the parsers: malformed lines are logged
//!   and skipped, structurally broken add-package messages abort the file.
//! - **File errors** (open/read failures, broken messages, failed writes)
//!   cancel every other worker; the first one is the run's result.
//!
//! Nothing is retried. Output written before a failure is left in place.

pub mod cancel;
pub mod config;
pub mod discovery;
pub mod orchestrator;

pub use cancel::FailFast;
pub use config::{DedupScope, ExtractConfig};
pub use discovery::find_source_files;
pub use orchestrator::{RunOptions, RunReport, extract, run_extraction};
