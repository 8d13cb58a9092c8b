use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Collect the transaction log files to scan
///
/// A `root` that is not a directory is returned as the only source, whatever
/// its extension. A directory is walked recursively and every regular file
/// whose name ends with `file_type` is returned, sorted by path.
///
/// # Errors
///
/// Returns an error if `root` cannot be stat'ed or any directory entry below it
/// cannot be read.
pub fn find_source_files(root: &Path, file_type: &str) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root)
        .with_context(|| format!("Unable to stat source path {}", root.display()))?;

    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Unable to walk directory {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        if entry.file_name().to_string_lossy().ends_with(file_type) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
