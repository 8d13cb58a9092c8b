use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::error::ExtractError;

/// Namespace stripped from package paths when none is configured
pub const DEFAULT_NAMESPACE_PREFIX: &str = "gno.land/";

/// Removes the first matching namespace prefix from a package path
///
/// # Examples
///
/// ```
/// use gno_source_extractor::utils::strip_namespace;
///
/// let prefixes = vec!["gno.land/".to_string()];
/// assert_eq!(strip_namespace("gno.land/p/demo/avl", &prefixes), "p/demo/avl");
/// assert_eq!(strip_namespace("example.com/r/x", &prefixes), "example.com/r/x");
/// ```
pub fn strip_namespace<'a>(path: &'a str, prefixes: &[String]) -> &'a str {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| path.strip_prefix(prefix.as_str()))
        .unwrap_or(path)
}

/// Converts a package path into a relative path below the output root
///
/// # Errors
///
/// Returns [`ExtractError::UnsafePath`] if the path is empty or contains
/// `..`, a root or a drive prefix.
pub fn package_relative_dir(path: &str) -> Result<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let relative = PathBuf::from(trimmed);

    let mut normal_components = 0;
    for component in relative.components() {
        match component {
            Component::Normal(_) => normal_components += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ExtractError::UnsafePath(path.to_string()).into());
            }
        }
    }

    if normal_components == 0 {
        return Err(ExtractError::UnsafePath(path.to_string()).into());
    }

    Ok(relative)
}

/// Validates that a package file name is a single plain path component
///
/// # Errors
///
/// Returns [`ExtractError::UnsafePath`] for empty names, names with
/// separators, `.` or `..`.
pub fn validate_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(ExtractError::UnsafePath(name.to_string()).into()),
    }
}

/// Appends `:<height>` to the final component of a directory path
pub fn with_height_suffix(dir: &Path, height: u64) -> PathBuf {
    let mut name = dir.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(":{}", height));
    dir.with_file_name(name)
}
