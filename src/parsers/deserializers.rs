use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for block numbers that accepts both JSON numbers and
/// decimal strings (`42` and `"42"`)
///
/// Amino JSON encodes 64-bit integers as strings, so tx-archive records carry
/// `"blockNum":"42"`.
pub fn deserialize_block_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| Error::custom("invalid block number")),
        Value::String(s) => s
            .parse::<u64>()
            .map_err(|e| Error::custom(format!("invalid block number {s:?}: {e}"))),
        _ => Err(Error::custom("block number must be a number or string")),
    }
}

/// Custom deserializer that reads `null` as the type's default
///
/// Amino writes nil slices as `null`; an absent field is covered separately
/// by `#[serde(default)]`.
pub fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use crate::models::{MemPackage, TxData};

    #[test]
    fn test_block_number_as_integer() {
        let data: TxData = serde_json::from_str(r#"{"tx":{"msg":[]},"blockNum":1234}"#).unwrap();
        assert_eq!(data.block_num, 1234);
    }

    #[test]
    fn test_block_number_as_string() {
        let data: TxData = serde_json::from_str(r#"{"tx":{"msg":[]},"blockNum":"42"}"#).unwrap();
        assert_eq!(data.block_num, 42);
    }

    #[test]
    fn test_block_number_rejects_garbage() {
        for json in [
            r#"{"tx":{"msg":[]},"blockNum":"forty-two"}"#,
            r#"{"tx":{"msg":[]},"blockNum":-1}"#,
            r#"{"tx":{"msg":[]},"blockNum":true}"#,
        ] {
            assert!(serde_json::from_str::<TxData>(json).is_err(), "{json} should not decode");
        }
    }

    #[test]
    fn test_null_files_read_as_empty() {
        let pkg: MemPackage =
            serde_json::from_str(r#"{"name":"x","path":"gno.land/p/x","files":null}"#).unwrap();
        assert!(pkg.files.is_empty());

        let pkg: MemPackage = serde_json::from_str(r#"{"name":"x","path":"gno.land/p/x"}"#).unwrap();
        assert!(pkg.files.is_empty());
    }
}
