//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use gno_source_extractor::models::transaction::{
    MSG_ADD_PACKAGE, MSG_CALL, MSG_RUN, MSG_SEND,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a directory of transaction log files
pub struct TxLogDirBuilder {
    temp_dir: TempDir,
}

impl TxLogDirBuilder {
    /// Create a new builder with an empty source directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the source directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a log file (relative path, parents created) with raw content
    pub fn with_raw_file(self, name: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create log dir");
        }
        fs::write(&path, content).expect("Failed to write log file");
        self
    }

    /// Add a log file with one record per line, newline terminated
    pub fn with_log(self, name: &str, records: &[String]) -> Self {
        let mut content = records.join("\n");
        content.push('\n');
        self.with_raw_file(name, &content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for TxLogDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `/vm.m_addpkg` messages
#[derive(Clone)]
pub struct AddPackageBuilder {
    name: String,
    path: String,
    creator: String,
    deposit: String,
    files: Vec<(String, String)>,
}

impl AddPackageBuilder {
    /// Create a package under `gno.land/` with one default file
    pub fn new(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or("pkg").to_string();
        Self {
            files: vec![(format!("{name}.gno"), format!("package {name}\n"))],
            name,
            path: path.to_string(),
            creator: "g1jg8mtutu9khhfwc4nxmuhcpftf0pajdhfvsqf5".to_string(),
            deposit: "100ugnot".to_string(),
        }
    }

    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = creator.to_string();
        self
    }

    pub fn deposit(mut self, deposit: &str) -> Self {
        self.deposit = deposit.to_string();
        self
    }

    /// Replace the file list
    pub fn files(mut self, files: &[(&str, &str)]) -> Self {
        self.files = files.iter().map(|(n, b)| (n.to_string(), b.to_string())).collect();
        self
    }

    pub fn to_value(&self) -> Value {
        let files: Vec<Value> =
            self.files.iter().map(|(name, body)| json!({"name": name, "body": body})).collect();
        json!({
            "@type": MSG_ADD_PACKAGE,
            "creator": self.creator,
            "package": {"name": self.name, "path": self.path, "files": files},
            "deposit": self.deposit,
        })
    }
}

/// A `/vm.m_call` message
pub fn call_msg(func: &str) -> Value {
    json!({
        "@type": MSG_CALL,
        "caller": "g1f4v282mwyhu29afke4vq5r2xzcm6z3ftnugcnv",
        "send": "",
        "pkg_path": "gno.land/r/demo/boards",
        "func": func,
        "args": ["1", "hello"],
    })
}

/// A `/bank.MsgSend` message
pub fn send_msg(amount: &str) -> Value {
    json!({
        "@type": MSG_SEND,
        "from_address": "g127jydsh6cms3lrtdenydxsckh23a8d6emqcvfa",
        "to_address": "g1u7y667z64x2h7vc6fmpcprgey4ck233jaww9zq",
        "amount": amount,
    })
}

/// An add-package message whose package descriptor is null
pub fn nil_package_msg() -> Value {
    json!({"@type": MSG_ADD_PACKAGE, "creator": "g1abc", "package": null, "deposit": ""})
}

/// A `/vm.m_run` message
pub fn run_msg() -> Value {
    json!({
        "@type": MSG_RUN,
        "caller": "g1abc",
        "send": "",
        "package": {"name": "main", "path": "gno.land/r/g1abc/run", "files": []},
    })
}

/// A tx-archive record as amino JSON writes it: `{"tx": {...}, "blockNum": "N"}`
pub fn annotated_record(msgs: &[Value], height: u64) -> String {
    annotated_record_with_height(msgs, json!(height.to_string()))
}

/// A tx-archive record with an arbitrary `blockNum` value
pub fn annotated_record_with_height(msgs: &[Value], height: Value) -> String {
    json!({
        "tx": {
            "msg": msgs,
            "fee": {"gas_wanted": "2000000", "gas_fee": "1000000ugnot"},
            "signatures": null,
            "memo": "",
        },
        "blockNum": height,
    })
    .to_string()
}

/// A legacy bare transaction record
pub fn bare_record(msgs: &[Value]) -> String {
    json!({"msg": msgs, "fee": {"gas_wanted": "1", "gas_fee": "1ugnot"}, "memo": ""}).to_string()
}

/// Read a package directory back: (file name, body) pairs sorted by name,
/// excluding the metadata file
pub fn read_package_dir(dir: &Path) -> Vec<(String, String)> {
    let mut files: Vec<(String, String)> = fs::read_dir(dir)
        .expect("Failed to read package dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .filter(|path| path.file_name().is_some_and(|n| n != "pkg_metadata.json"))
        .map(|path| {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            (name, fs::read_to_string(&path).expect("Failed to read package file"))
        })
        .collect();
    files.sort();
    files
}

/// Output directory helper
pub fn output_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create output dir");
    let out = temp.path().join("extracted");
    (temp, out)
}
