use serde::de::DeserializeOwned;

use crate::models::{Message, Tx, TxData};

/// Longest slice of a raw record quoted in log output
const PREVIEW_BYTES: usize = 512;

/// The on-disk shape of each record in a transaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TxShape {
    /// `{"tx": {...}, "blockNum": N}` as produced by tx-archive
    #[default]
    Annotated,
    /// A bare `{"msg": [...]}` transaction from the legacy tx sheets
    Bare,
}

/// A decoded record that can hand over its messages and report its height.
///
/// Implemented once per [`TxShape`]; the scanner is generic over it so each
/// shape keeps its own struct instead of one struct with optional fields.
pub trait TxEnvelope: DeserializeOwned {
    fn height(&self) -> u64;
    fn into_messages(self) -> Vec<Message>;
}

impl TxEnvelope for Tx {
    fn height(&self) -> u64 {
        0
    }

    fn into_messages(self) -> Vec<Message> {
        self.msgs
    }
}

impl TxEnvelope for TxData {
    fn height(&self) -> u64 {
        self.block_num
    }

    fn into_messages(self) -> Vec<Message> {
        self.tx.msgs
    }
}

/// Decode one record into the requested envelope
pub fn decode_record<T: TxEnvelope>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Printable, bounded rendering of a raw record for warnings
pub fn preview(bytes: &[u8]) -> String {
    if bytes.len() <= PREVIEW_BYTES {
        return String::from_utf8_lossy(bytes).into_owned();
    }

    let mut out = String::from_utf8_lossy(&bytes[..PREVIEW_BYTES]).into_owned();
    out.push_str(&format!("... ({} bytes total)", bytes.len()));
    out
}
