use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::error::ExtractError;
use crate::output::CollisionPolicy;
use crate::parsers::TxShape;
use crate::parsers::framing::DEFAULT_BUFFER_CAPACITY;
use crate::utils::DEFAULT_NAMESPACE_PREFIX;

/// Boundary over which repeated package paths are suppressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupScope {
    /// A fresh key set for every input file
    #[default]
    PerFile,
    /// One key set shared by every file of the run
    Run,
    /// Emit every deployment
    Disabled,
}

/// Settings for a single extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// File suffix to pick up when `source_path` is a directory, e.g. `.jsonl`
    pub file_type: String,
    /// A log file, or a directory searched recursively
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub tx_shape: TxShape,
    pub dedup_scope: DedupScope,
    pub collision: CollisionPolicy,
    /// Prefixes removed from package paths before they become directories
    pub namespace_prefixes: Vec<String>,
    /// Worker threads; `None` uses rayon's default pool
    pub jobs: Option<usize>,
    /// Give up once this much time has passed since the run started
    pub timeout: Option<Duration>,
    pub buffer_capacity: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            file_type: ".jsonl".to_string(),
            source_path: PathBuf::new(),
            output_dir: PathBuf::from("./extracted"),
            tx_shape: TxShape::default(),
            dedup_scope: DedupScope::default(),
            collision: CollisionPolicy::default(),
            namespace_prefixes: vec![DEFAULT_NAMESPACE_PREFIX.to_string()],
            jobs: None,
            timeout: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ExtractConfig {
    /// Check the settings that must hold before any file is touched
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidFileType`], [`ExtractError::InvalidSourcePath`]
    /// or [`ExtractError::InvalidOutputDir`] for empty values.
    pub fn validate(&self) -> Result<()> {
        if self.file_type.is_empty() {
            return Err(ExtractError::InvalidFileType.into());
        }

        if self.source_path.as_os_str().is_empty() {
            return Err(ExtractError::InvalidSourcePath.into());
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ExtractError::InvalidOutputDir.into());
        }

        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be at least 1");
        }

        Ok(())
    }
}
