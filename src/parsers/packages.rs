use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};

use crate::error::ExtractError;
use crate::models::{Message, PackageEvent, Tx, TxData};
use crate::parsers::framing::{DEFAULT_BUFFER_CAPACITY, FramedLineReader};
use crate::parsers::records::{TxEnvelope, TxShape, decode_record, preview};

/// Package paths already seen across every file of a run.
///
/// Check-and-insert happens under one lock, so exactly one worker wins a
/// given path even when several files race for it.
#[derive(Debug, Default)]
pub struct SharedPaths {
    seen: Mutex<HashSet<String>>,
}

impl SharedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, path: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains(path) {
            return false;
        }
        seen.insert(path.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dedup key set used while scanning one file
#[derive(Debug)]
pub enum PathTracker<'a> {
    /// Every deployment is emitted, repeats included
    Disabled,
    /// Paths tracked for this file only
    Local(HashSet<String>),
    /// Paths tracked for the whole run
    Shared(&'a SharedPaths),
}

impl PathTracker<'_> {
    pub fn local() -> Self {
        PathTracker::Local(HashSet::new())
    }

    /// Returns true the first time `path` is offered within this scope
    pub fn first_sighting(&mut self, path: &str) -> bool {
        match self {
            PathTracker::Disabled => true,
            PathTracker::Local(seen) => {
                if seen.contains(path) {
                    return false;
                }
                seen.insert(path.to_string())
            }
            PathTracker::Shared(shared) => shared.insert(path),
        }
    }
}

/// Per-file scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    /// Non-blank records read
    pub records: usize,
    pub blank_lines: usize,
    /// Records that failed to decode and were skipped
    pub skipped_records: usize,
    /// Messages of any kind other than add-package
    pub ignored_messages: usize,
    /// Package events handed to the sink
    pub packages: usize,
    /// Deployments dropped because their path was already seen
    pub duplicates: usize,
}

/// Streams one transaction log and emits the package deployments it contains.
///
/// Records are handled strictly in file order:
/// 1. framed into lines (no length limit)
/// 2. decoded into the configured envelope; failures are logged and skipped
/// 3. add-package messages turned into [`PackageEvent`]s, others ignored
/// 4. repeated package paths dropped according to the [`PathTracker`]
pub struct PackageScanner<'a> {
    source: &'a Path,
    tracker: PathTracker<'a>,
    buffer_capacity: usize,
}

impl<'a> PackageScanner<'a> {
    pub fn new(source: &'a Path, tracker: PathTracker<'a>) -> Self {
        Self { source, tracker, buffer_capacity: DEFAULT_BUFFER_CAPACITY }
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Scan `reader` using the envelope selected by `shape`
    pub fn scan<R, C, E>(
        &mut self,
        shape: TxShape,
        reader: R,
        checkpoint: C,
        emit: E,
    ) -> Result<FileReport>
    where
        R: Read,
        C: FnMut() -> Result<()>,
        E: FnMut(PackageEvent) -> Result<()>,
    {
        match shape {
            TxShape::Annotated => self.scan_as::<TxData, _, _, _>(reader, checkpoint, emit),
            TxShape::Bare => self.scan_as::<Tx, _, _, _>(reader, checkpoint, emit),
        }
    }

    /// Scan `reader`, decoding every record as `T`.
    ///
    /// `checkpoint` runs before each record is read and stops the scan when
    /// it fails. `emit` receives each surviving event immediately; its error
    /// also stops the scan.
    pub fn scan_as<T, R, C, E>(
        &mut self,
        reader: R,
        mut checkpoint: C,
        mut emit: E,
    ) -> Result<FileReport>
    where
        T: TxEnvelope,
        R: Read,
        C: FnMut() -> Result<()>,
        E: FnMut(PackageEvent) -> Result<()>,
    {
        let mut report = FileReport { source: self.source.to_path_buf(), ..FileReport::default() };
        let mut lines = FramedLineReader::with_capacity(self.buffer_capacity, reader);

        loop {
            checkpoint()?;

            let Some(record) = lines.next() else {
                break;
            };
            let record = record.with_context(|| {
                format!(
                    "Failed to read line {} from {}",
                    report.records + report.blank_lines + 1,
                    self.source.display()
                )
            })?;

            if record.bytes.iter().all(u8::is_ascii_whitespace) {
                report.blank_lines += 1;
                continue;
            }
            report.records += 1;

            let envelope = match decode_record::<T>(&record.bytes) {
                Ok(envelope) => envelope,
                Err(e) => {
                    report.skipped_records += 1;
                    if record.terminated {
                        warn!(
                            source = %self.source.display(),
                            line = record.line_number,
                            content = %preview(&record.bytes),
                            error = %e,
                            "Skipping record that failed to decode"
                        );
                    } else {
                        warn!(
                            source = %self.source.display(),
                            line = record.line_number,
                            content = %preview(&record.bytes),
                            error = %e,
                            "Skipping truncated final record"
                        );
                    }
                    continue;
                }
            };

            let height = envelope.height();
            for message in envelope.into_messages() {
                let Message::AddPackage(msg) = message else {
                    trace!(line = record.line_number, kind = ?message.kind(), "Ignoring message");
                    report.ignored_messages += 1;
                    continue;
                };

                let event = PackageEvent::from_message(msg, height).map_err(|reason| {
                    ExtractError::InvalidPackage {
                        source_file: self.source.to_path_buf(),
                        line: record.line_number,
                        reason,
                    }
                })?;

                if !self.tracker.first_sighting(event.path()) {
                    report.duplicates += 1;
                    debug!(
                        source = %self.source.display(),
                        line = record.line_number,
                        path = event.path(),
                        "Dropping repeated deployment"
                    );
                    continue;
                }

                report.packages += 1;
                emit(event)?;
            }
        }

        Ok(report)
    }
}
