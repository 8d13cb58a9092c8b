use std::path::PathBuf;

use thiserror::Error;

/// Classified failures the extractor reports.
///
/// These travel inside `anyhow::Error` like every other failure in the crate;
/// callers that need to tell them apart use `downcast_ref::<ExtractError>()`.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no file type specified")]
    InvalidFileType,

    #[error("invalid source path")]
    InvalidSourcePath,

    #[error("invalid output directory")]
    InvalidOutputDir,

    #[error("no source files found, exiting")]
    NoSourceFiles,

    /// A well-typed add-package message that is structurally incomplete.
    #[error("invalid add-package message at line {line} in {}: {reason}", source_file.display())]
    InvalidPackage { source_file: PathBuf, line: usize, reason: String },

    /// A package path or file name that would escape the output root.
    #[error("refusing to write outside the output directory: {0}")]
    UnsafePath(String),

    #[error("extraction cancelled")]
    Cancelled,

    #[error("extraction deadline exceeded")]
    DeadlineExceeded,
}
