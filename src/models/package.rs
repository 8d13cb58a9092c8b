use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::transaction::MsgAddPackage;

/// One source file of an extracted package. `body` is kept byte-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub name: String,
    pub body: String,
}

/// Metadata written next to the package sources as `pkg_metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// The deployer of the package
    pub creator: String,
    /// The deposit attached to the deployment
    pub deposit: String,
}

/// A single package deployment pulled out of a transaction log.
///
/// Built once from its source message and never mutated afterwards; the
/// constructor rejects messages that cannot describe a package (no package
/// descriptor, empty path, no files, repeated file names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEvent {
    path: String,
    name: String,
    files: Vec<PackageFile>,
    creator: String,
    deposit: String,
    height: u64,
}

impl PackageEvent {
    /// Builds an event from a decoded add-package message.
    ///
    /// The `Err` value is a human-readable reason; the caller attaches the
    /// source location.
    pub fn from_message(msg: MsgAddPackage, height: u64) -> Result<Self, String> {
        let Some(package) = msg.package else {
            return Err("package descriptor is missing".to_string());
        };

        if package.path.is_empty() {
            return Err(format!("package {:?} has an empty path", package.name));
        }

        if package.files.is_empty() {
            return Err(format!("package {} has no files", package.path));
        }

        let mut names = HashSet::with_capacity(package.files.len());
        for file in &package.files {
            if !names.insert(file.name.as_str()) {
                return Err(format!("package {} repeats file {}", package.path, file.name));
            }
        }

        let files =
            package.files.into_iter().map(|f| PackageFile { name: f.name, body: f.body }).collect();

        Ok(Self {
            path: package.path,
            name: package.name,
            files,
            creator: msg.creator,
            deposit: msg.deposit,
            height,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn deposit(&self) -> &str {
        &self.deposit
    }

    /// Block height of the deployment, `0` when the log format carries none
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn metadata(&self) -> Metadata {
        Metadata { creator: self.creator.clone(), deposit: self.deposit.clone() }
    }
}
