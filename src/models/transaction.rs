use serde::{Deserialize, Serialize};

/// Type URL of the package-publish message.
pub const MSG_ADD_PACKAGE: &str = "/vm.m_addpkg";
pub const MSG_CALL: &str = "/vm.m_call";
pub const MSG_RUN: &str = "/vm.m_run";
pub const MSG_SEND: &str = "/bank.MsgSend";

/// A bare transaction as written by the legacy tx sheets: `{"msg": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tx {
    #[serde(
        rename = "msg",
        alias = "msgs",
        deserialize_with = "crate::parsers::deserializers::deserialize_null_as_default"
    )]
    pub msgs: Vec<Message>,
}

/// A transaction annotated with the block it was included in:
/// `{"tx": {"msg": [...]}, "blockNum": "42"}`. The block number is read from
/// either a string or a plain number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxData {
    pub tx: Tx,
    #[serde(
        rename = "blockNum",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_block_number"
    )]
    pub block_num: u64,
}

/// Transaction message, discriminated by its `@type` URL.
///
/// Only add-package messages are modelled in full. The other known kinds
/// are recognised so they can be counted, and unknown kinds fall through to
/// [`Message::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Message {
    #[serde(rename = "/vm.m_addpkg")]
    AddPackage(MsgAddPackage),
    #[serde(rename = "/vm.m_call")]
    Call,
    #[serde(rename = "/vm.m_run")]
    Run,
    #[serde(rename = "/bank.MsgSend")]
    Transfer,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    AddPackage,
    Call,
    Run,
    Transfer,
    Other,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::AddPackage(_) => MessageKind::AddPackage,
            Message::Call => MessageKind::Call,
            Message::Run => MessageKind::Run,
            Message::Transfer => MessageKind::Transfer,
            Message::Other => MessageKind::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsgAddPackage {
    #[serde(default)]
    pub creator: String,
    /// `None` when the record carries `"package": null` or omits it entirely.
    #[serde(default)]
    pub package: Option<MemPackage>,
    #[serde(default)]
    pub deposit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemPackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_null_as_default"
    )]
    pub files: Vec<MemFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemFile {
    pub name: String,
    pub body: String,
}
