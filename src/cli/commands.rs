use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::extractor::{DedupScope, ExtractConfig, RunReport, extract};
use crate::output::CollisionPolicy;
use crate::parsers::TxShape;
use crate::parsers::framing::DEFAULT_BUFFER_CAPACITY;
use crate::utils::DEFAULT_NAMESPACE_PREFIX;

#[derive(Parser, Debug)]
#[command(name = "gno-source-extractor")]
#[command(version = "0.1.0")]
#[command(about = "The Gno / TM2 source code extractor", long_about = None)]
pub struct Cli {
    /// The file type for analysis, with a preceding period (ie .jsonl)
    #[arg(long, default_value = ".jsonl")]
    pub file_type: String,

    /// The source file or folder containing transaction data
    #[arg(long, env = "EXTRACTOR_SOURCE_PATH", default_value = "")]
    pub source_path: PathBuf,

    /// The output directory for the extracted Gno source code
    #[arg(long, env = "EXTRACTOR_OUTPUT_DIR", default_value = "./extracted")]
    pub output_dir: PathBuf,

    /// Read legacy tx sheets (bare transactions without block numbers)
    #[arg(long)]
    pub legacy_mode: bool,

    /// Scope over which repeated package paths are dropped
    #[arg(long, value_enum, default_value_t = DedupArg::PerFile)]
    pub dedup_scope: DedupArg,

    /// What to do when a package directory already exists
    #[arg(long, value_enum, default_value_t = CollisionArg::SuffixHeight)]
    pub collision: CollisionArg,

    /// Namespace prefix stripped from package paths (repeatable)
    #[arg(long = "strip-prefix", default_values_t = [DEFAULT_NAMESPACE_PREFIX.to_string()])]
    pub strip_prefixes: Vec<String>,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Abort the run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Size in bytes of the line reader's buffer
    #[arg(long, default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupArg {
    PerFile,
    Run,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    SuffixHeight,
    Overwrite,
}

impl From<DedupArg> for DedupScope {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::PerFile => DedupScope::PerFile,
            DedupArg::Run => DedupScope::Run,
            DedupArg::Disabled => DedupScope::Disabled,
        }
    }
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::SuffixHeight => CollisionPolicy::SuffixHeight,
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
        }
    }
}

impl Cli {
    pub fn config(&self) -> ExtractConfig {
        ExtractConfig {
            file_type: self.file_type.clone(),
            source_path: self.source_path.clone(),
            output_dir: self.output_dir.clone(),
            tx_shape: if self.legacy_mode { TxShape::Bare } else { TxShape::Annotated },
            dedup_scope: self.dedup_scope.into(),
            collision: self.collision.into(),
            namespace_prefixes: self.strip_prefixes.clone(),
            jobs: self.jobs,
            timeout: self.timeout_secs.map(Duration::from_secs),
            buffer_capacity: self.buffer_size,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    let report = extract(&config)?;
    print_summary(&report, &config);

    Ok(())
}

fn print_summary(report: &RunReport, config: &ExtractConfig) {
    println!("Extraction Summary");
    println!("==================");
    println!("Files scanned: {}", report.files_scanned());
    println!("Records read: {}", report.records());
    println!("  Skipped (malformed): {}", report.skipped_records());
    println!("Packages written: {}", report.packages());
    println!("  Duplicates dropped: {}", report.duplicates());
    println!();
    println!("Output directory: {}", config.output_dir.display());
}
