//! Fans the package scanner out over every source file.
//!
//! # Error Handling Strategy
//!
//! Unlike the record level, where malformed lines are skipped, any failure at
//! file level is fatal for the whole run:
//!
//! - **Fail-fast**: opening or reading a file, a structurally broken
//!   add-package message, or a failed write records the error in a shared
//!   [`FailFast`] signal and cancels the run.
//! - **Prompt stop**: every worker checks the signal before it opens its file
//!   and before each record, so files not yet started are never opened and
//!   in-flight files stop at the next record.
//! - **Single outcome**: the first recorded error is the run's result.
//! - **No rollback**: packages already written by an aborted run stay on disk.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::extractor::cancel::FailFast;
use crate::extractor::config::{DedupScope, ExtractConfig};
use crate::extractor::discovery::find_source_files;
use crate::output::{FsMaterializer, PackageSink};
use crate::parsers::framing::DEFAULT_BUFFER_CAPACITY;
use crate::parsers::{FileReport, PackageScanner, PathTracker, SharedPaths, TxShape};

/// Knobs of the fan-out itself, independent of where sources come from
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub tx_shape: TxShape,
    pub dedup_scope: DedupScope,
    pub jobs: Option<usize>,
    pub timeout: Option<Duration>,
    pub buffer_capacity: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tx_shape: TxShape::default(),
            dedup_scope: DedupScope::default(),
            jobs: None,
            timeout: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl From<&ExtractConfig> for RunOptions {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            tx_shape: config.tx_shape,
            dedup_scope: config.dedup_scope,
            jobs: config.jobs,
            timeout: config.timeout,
            buffer_capacity: config.buffer_capacity,
        }
    }
}

/// Totals of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Per-file reports, in source order
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn files_scanned(&self) -> usize {
        self.files.len()
    }

    pub fn records(&self) -> usize {
        self.files.iter().map(|f| f.records).sum()
    }

    pub fn skipped_records(&self) -> usize {
        self.files.iter().map(|f| f.skipped_records).sum()
    }

    pub fn packages(&self) -> usize {
        self.files.iter().map(|f| f.packages).sum()
    }

    pub fn duplicates(&self) -> usize {
        self.files.iter().map(|f| f.duplicates).sum()
    }
}

/// Validate `config`, discover its sources and extract every package to disk
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid (see [`ExtractConfig::validate`])
/// - the source path cannot be read, or holds no matching files
///   ([`ExtractError::NoSourceFiles`])
/// - any file fails fatally (see [`run_extraction`])
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use gno_source_extractor::{ExtractConfig, extract};
///
/// let config = ExtractConfig {
///     source_path: PathBuf::from("./txs"),
///     output_dir: PathBuf::from("./extracted"),
///     ..ExtractConfig::default()
/// };
/// let report = extract(&config)?;
/// println!("Extracted {} packages", report.packages());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn extract(config: &ExtractConfig) -> Result<RunReport> {
    config.validate()?;

    let sources = find_source_files(&config.source_path, &config.file_type)
        .context("Unable to find source files")?;
    if sources.is_empty() {
        return Err(ExtractError::NoSourceFiles.into());
    }

    info!(
        files = sources.len(),
        source = %config.source_path.display(),
        output = %config.output_dir.display(),
        "Starting extraction"
    );

    let sink = FsMaterializer::new(&config.output_dir)
        .with_namespace_prefixes(config.namespace_prefixes.clone())
        .with_collision_policy(config.collision);

    run_extraction(&sources, &RunOptions::from(config), &sink)
}

/// Scan every file in `sources` concurrently, handing each package to `sink`
///
/// One rayon task per file. With `jobs == Some(1)` files are processed one
/// after another in the given order.
///
/// # Errors
///
/// Returns the first fatal error of any worker: a file that cannot be opened
/// or read, an add-package message without a usable package, a sink failure,
/// or [`ExtractError::DeadlineExceeded`].
pub fn run_extraction<S: PackageSink>(
    sources: &[PathBuf],
    options: &RunOptions,
    sink: &S,
) -> Result<RunReport> {
    let started = Instant::now();
    let signal = FailFast::new(options.timeout.map(|t| started + t));
    let shared = SharedPaths::new();

    let fan_out = || -> Vec<Option<FileReport>> {
        sources
            .par_iter()
            .map(|source| {
                let tracker = match options.dedup_scope {
                    DedupScope::PerFile => PathTracker::local(),
                    DedupScope::Run => PathTracker::Shared(&shared),
                    DedupScope::Disabled => PathTracker::Disabled,
                };

                match process_file(source, options, tracker, &signal, sink) {
                    Ok(report) => Some(report),
                    Err(err) => {
                        signal.fail(err);
                        None
                    }
                }
            })
            .collect()
    };

    let outcomes = match options.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build worker pool")?
            .install(fan_out),
        None => fan_out(),
    };

    signal.into_result()?;

    let report = RunReport { files: outcomes.into_iter().flatten().collect() };
    info!(
        files = report.files_scanned(),
        packages = report.packages(),
        skipped = report.skipped_records(),
        duplicates = report.duplicates(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extraction finished"
    );

    Ok(report)
}

fn process_file<S: PackageSink>(
    source: &Path,
    options: &RunOptions,
    tracker: PathTracker<'_>,
    signal: &FailFast,
    sink: &S,
) -> Result<FileReport> {
    // Files not yet started never open once the run is cancelled
    signal.check()?;

    let file =
        File::open(source).with_context(|| format!("Unable to open file {}", source.display()))?;
    debug!(source = %source.display(), "Scanning file");

    let report = PackageScanner::new(source, tracker)
        .with_buffer_capacity(options.buffer_capacity)
        .scan(
            options.tx_shape,
            file,
            || signal.check(),
            |event| sink.materialize(&event).map(|_| ()),
        )?;

    info!(
        source = %source.display(),
        records = report.records,
        packages = report.packages,
        skipped = report.skipped_records,
        duplicates = report.duplicates,
        "Scanned file"
    );

    Ok(report)
}
