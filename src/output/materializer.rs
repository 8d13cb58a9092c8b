//! Filesystem materializer: one directory per package under the output root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::PackageEvent;
use crate::output::PackageSink;
use crate::utils::{
    DEFAULT_NAMESPACE_PREFIX, package_relative_dir, strip_namespace, validate_file_name,
    with_height_suffix,
};

/// Name of the metadata document written into every package directory
pub const PACKAGE_METADATA_FILE: &str = "pkg_metadata.json";

/// What to do when a package's output directory already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Write into `<dir>:<height>` instead
    #[default]
    SuffixHeight,
    /// Write into the existing directory, replacing files with the same name
    Overwrite,
}

/// Writes package files and metadata below `output_root`.
#[derive(Debug, Clone)]
pub struct FsMaterializer {
    output_root: PathBuf,
    namespace_prefixes: Vec<String>,
    collision: CollisionPolicy,
}

impl FsMaterializer {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            namespace_prefixes: vec![DEFAULT_NAMESPACE_PREFIX.to_string()],
            collision: CollisionPolicy::default(),
        }
    }

    pub fn with_namespace_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.namespace_prefixes = prefixes;
        self
    }

    pub fn with_collision_policy(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory a package would be written to if nothing existed yet
    pub fn base_dir(&self, event: &PackageEvent) -> Result<PathBuf> {
        let stripped = strip_namespace(event.path(), &self.namespace_prefixes);
        Ok(self.output_root.join(package_relative_dir(stripped)?))
    }

    /// Creates (or picks) the directory this event will be written into.
    ///
    /// With [`CollisionPolicy::SuffixHeight`] the directory is claimed with a
    /// single `create_dir`, so two workers cannot both believe they created it.
    fn claim_dir(&self, base: &Path, height: u64) -> Result<PathBuf> {
        match self.collision {
            CollisionPolicy::Overwrite => {
                fs::create_dir_all(base)
                    .with_context(|| format!("Failed to create directory {}", base.display()))?;
                Ok(base.to_path_buf())
            }
            CollisionPolicy::SuffixHeight => {
                if let Some(parent) = base.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }

                match fs::create_dir(base) {
                    Ok(()) => Ok(base.to_path_buf()),
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                        let suffixed = with_height_suffix(base, height);
                        fs::create_dir_all(&suffixed).with_context(|| {
                            format!("Failed to create directory {}", suffixed.display())
                        })?;
                        Ok(suffixed)
                    }
                    Err(e) => Err(e)
                        .with_context(|| format!("Failed to create directory {}", base.display())),
                }
            }
        }
    }
}

impl PackageSink for FsMaterializer {
    fn materialize(&self, event: &PackageEvent) -> Result<PathBuf> {
        // Validate everything before touching the filesystem
        let base = self.base_dir(event)?;
        for file in event.files() {
            validate_file_name(&file.name)?;
        }

        let dir = self.claim_dir(&base, event.height())?;

        for file in event.files() {
            let path = dir.join(&file.name);
            fs::write(&path, file.body.as_bytes())
                .with_context(|| format!("Failed to write file {}", path.display()))?;
        }

        let metadata_path = dir.join(PACKAGE_METADATA_FILE);
        let metadata =
            serde_json::to_vec(&event.metadata()).context("Failed to serialize package metadata")?;
        fs::write(&metadata_path, metadata).with_context(|| {
            format!("Failed to write package metadata {}", metadata_path.display())
        })?;

        debug!(
            path = event.path(),
            height = event.height(),
            files = event.files().len(),
            dir = %dir.display(),
            "Wrote package"
        );

        Ok(dir)
    }
}
