//! Package output.
//!
//! The orchestrator hands every extracted [`PackageEvent`] to a
//! [`PackageSink`] as soon as it is produced. [`FsMaterializer`] is the
//! filesystem implementation used by the binary.

pub mod materializer;

use std::path::PathBuf;

use anyhow::Result;

use crate::models::PackageEvent;

pub use materializer::{CollisionPolicy, FsMaterializer, PACKAGE_METADATA_FILE};

/// Destination for extracted packages.
///
/// Shared by all file workers, hence `Sync`. Implementations must report
/// every failed write as an error.
pub trait PackageSink: Sync {
    /// Persist one package and return the directory it was written to
    fn materialize(&self, event: &PackageEvent) -> Result<PathBuf>;
}
