//! Streaming parsers for Gno transaction logs
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach for individual
//! records and a strict one for everything else:
//!
//! - **Malformed records**: lines that do not decode into the configured
//!   transaction shape are logged as warnings (source, line number, a preview
//!   of the raw content) and skipped. They never abort a file, however many
//!   there are.
//!
//! - **Broken add-package messages**: a record that decodes but carries an
//!   add-package message without a usable package (missing descriptor, empty
//!   path, no files, repeated file names) aborts the file with
//!   [`ExtractError::InvalidPackage`](crate::error::ExtractError::InvalidPackage).
//!
//! - **I/O errors** while reading abort the file.
//!
//! - **Unrelated messages** (calls, transfers, runs, unknown types) are
//!   counted and ignored.

pub mod deserializers;
pub mod framing;
pub mod packages;
pub mod records;

pub use framing::{FramedLineReader, Record};
pub use packages::{FileReport, PackageScanner, PathTracker, SharedPaths};
pub use records::{TxEnvelope, TxShape, decode_record};
