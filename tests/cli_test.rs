/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{
    AddPackageBuilder, TxLogDirBuilder, annotated_record, bare_record, nil_package_msg, output_dir,
};
use predicates::prelude::*;

fn extractor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gno-source-extractor"));
    cmd.env_remove("EXTRACTOR_SOURCE_PATH")
        .env_remove("EXTRACTOR_OUTPUT_DIR")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_cli_extracts_and_prints_summary() {
    let logs = TxLogDirBuilder::new()
        .with_log(
            "txs.jsonl",
            &[
                annotated_record(&[AddPackageBuilder::new("gno.land/p/demo/ufmt").to_value()], 1),
                "garbage".to_string(),
            ],
        )
        .build();
    let (_out_guard, out) = output_dir();

    extractor()
        .arg("--source-path")
        .arg(logs.path())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction Summary"))
        .stdout(predicate::str::contains("Files scanned: 1"))
        .stdout(predicate::str::contains("Skipped (malformed): 1"))
        .stdout(predicate::str::contains("Packages written: 1"));

    assert!(out.join("p/demo/ufmt/ufmt.gno").is_file());
}

#[test]
fn test_cli_reads_paths_from_environment() {
    let logs = TxLogDirBuilder::new()
        .with_log(
            "txs.jsonl",
            &[annotated_record(&[AddPackageBuilder::new("gno.land/r/demo/env").to_value()], 1)],
        )
        .build();
    let (_out_guard, out) = output_dir();

    extractor()
        .env("EXTRACTOR_SOURCE_PATH", logs.path())
        .env("EXTRACTOR_OUTPUT_DIR", &out)
        .assert()
        .success();

    assert!(out.join("r/demo/env").is_dir());
}

#[test]
fn test_cli_legacy_mode() {
    let logs = TxLogDirBuilder::new()
        .with_log(
            "legacy.jsonl",
            &[bare_record(&[AddPackageBuilder::new("gno.land/p/demo/old").to_value()])],
        )
        .build();
    let (_out_guard, out) = output_dir();

    extractor()
        .arg("--source-path")
        .arg(logs.path())
        .arg("--output-dir")
        .arg(&out)
        .arg("--legacy-mode")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages written: 1"));

    assert!(out.join("p/demo/old").is_dir());
}

#[test]
fn test_cli_missing_source_path_fails() {
    extractor()
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid source path"));
}

#[test]
fn test_cli_no_source_files_fails() {
    let logs = TxLogDirBuilder::new().with_raw_file("notes.txt", "nothing here").build();
    let (_out_guard, out) = output_dir();

    extractor()
        .arg("--source-path")
        .arg(logs.path())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source files found, exiting"));
}

#[test]
fn test_cli_broken_package_exits_nonzero() {
    let logs = TxLogDirBuilder::new()
        .with_log("txs.jsonl", &[annotated_record(&[nil_package_msg()], 1)])
        .build();
    let (_out_guard, out) = output_dir();

    extractor()
        .arg("--source-path")
        .arg(logs.path())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid add-package message at line 1"));
}

#[test]
fn test_cli_help_flag() {
    extractor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Gno / TM2 source code extractor"))
        .stdout(predicate::str::contains("--source-path"))
        .stdout(predicate::str::contains("--legacy-mode"));
}

#[test]
fn test_cli_version_flag() {
    extractor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_flag_value() {
    extractor()
        .arg("--dedup-scope")
        .arg("everywhere")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
