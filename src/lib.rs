//! Gno Source Extractor - Pull published package sources out of transaction logs
//!
//! This library scans newline-delimited Gno / TM2 transaction logs and writes
//! the source files of every deployed package to disk. It supports:
//!
//! - Framing lines of any length through a fixed-size buffer
//! - Decoding both tx-archive records (`{"tx": ..., "blockNum": ...}`) and
//!   legacy bare transactions
//! - Filtering add-package messages and suppressing repeated package paths
//!   per file or per run
//! - Processing many log files concurrently with fail-fast cancellation
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use gno_source_extractor::{ExtractConfig, extract};
//!
//! let config = ExtractConfig {
//!     source_path: PathBuf::from("/var/lib/tx-archive"),
//!     ..ExtractConfig::default()
//! };
//! let report = extract(&config)?;
//! println!("Extracted {} packages", report.packages());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod extractor;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use error::ExtractError;
pub use extractor::{DedupScope, ExtractConfig, RunReport, extract, run_extraction};
pub use models::{Metadata, PackageEvent, PackageFile};
pub use output::{CollisionPolicy, FsMaterializer, PackageSink};
pub use parsers::{PackageScanner, TxShape};
