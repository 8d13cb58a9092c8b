//! Data models for Gno transaction logs and extracted packages.
//!
//! - [`Tx`] / [`TxData`] - the two transaction shapes found in log files
//! - [`Message`] - `@type`-tagged transaction messages
//! - [`PackageEvent`] - a validated package deployment ready to be written out
//! - [`Metadata`] - the `pkg_metadata.json` document

pub mod package;
pub mod transaction;

pub use package::{Metadata, PackageEvent, PackageFile};
pub use transaction::{MemFile, MemPackage, Message, MessageKind, MsgAddPackage, Tx, TxData};
