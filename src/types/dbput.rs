//! Key and value types for DB Put transactions.
//!
//! A DB Put stores a small value under a text key in the chain's database.
//! Both halves serialize with a 2-byte big-endian length prefix; the value
//! additionally carries a one-byte data-type id so nodes can re-parse it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum byte length that fits a u16 length prefix.
const MAX_PREFIXED_LEN: usize = u16::MAX as usize;

/// The key a DB Put transaction stores its value under.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbKey(String);

impl DbKey {
    /// Create a key, rejecting keys too long for the 2-byte length prefix.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.len() > MAX_PREFIXED_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "dbKey",
                len: key.len(),
                max: MAX_PREFIXED_LEN,
            });
        }
        Ok(Self(key))
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Serialized form: length (2 bytes BE) followed by the raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + self.0.len());
        bytes.extend_from_slice(&(self.0.len() as u16).to_be_bytes());
        bytes.extend_from_slice(self.0.as_bytes());
        bytes
    }
}

/// The value stored by a DB Put transaction, tagged with its declared type.
///
/// The wire format currently defines a single data type, `ByteArray` (id 1);
/// the id byte leaves room for more. The broadcast payload names the type by
/// its string form so the node can re-parse the stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DbData {
    /// Free-form data, sent as text in the broadcast payload.
    ByteArray(String),
}

impl DbData {
    /// Create a `ByteArray` value, rejecting data too long for the length
    /// prefix (which also covers the type id byte).
    pub fn byte_array(data: impl Into<String>) -> Result<Self, ValidationError> {
        let data = data.into();
        if data.len() + 1 > MAX_PREFIXED_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "data",
                len: data.len(),
                max: MAX_PREFIXED_LEN - 1,
            });
        }
        Ok(Self::ByteArray(data))
    }

    /// The one-byte data-type id.
    pub fn type_id(&self) -> u8 {
        match self {
            DbData::ByteArray(_) => 1,
        }
    }

    /// The data-type name used in the broadcast payload.
    pub fn type_name(&self) -> &'static str {
        match self {
            DbData::ByteArray(_) => "ByteArray",
        }
    }

    /// The stored text.
    pub fn as_str(&self) -> &str {
        match self {
            DbData::ByteArray(data) => data,
        }
    }

    /// Serialized form: length+1 (2 bytes BE) · type id (1) · raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let data = self.as_str().as_bytes();
        let mut bytes = Vec::with_capacity(3 + data.len());
        bytes.extend_from_slice(&((data.len() + 1) as u16).to_be_bytes());
        bytes.push(self.type_id());
        bytes.extend_from_slice(data);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_key_serialization() {
        let key = DbKey::new("weather").unwrap();
        assert_eq!(key.to_bytes(), b"\x00\x07weather");
    }

    #[test]
    fn test_empty_db_key_serializes_as_zero_prefix() {
        let key = DbKey::new("").unwrap();
        assert_eq!(key.to_bytes(), vec![0, 0]);
    }

    #[test]
    fn test_byte_array_serialization() {
        let data = DbData::byte_array("sunny").unwrap();
        // length covers the type id byte as well
        assert_eq!(data.to_bytes(), b"\x00\x06\x01sunny");
        assert_eq!(data.type_id(), 1);
        assert_eq!(data.type_name(), "ByteArray");
    }

    #[test]
    fn test_length_prefix_matches_payload() {
        let data = DbData::byte_array("x".repeat(300)).unwrap();
        let bytes = data.to_bytes();
        let prefix = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        assert_eq!(prefix, bytes.len() - 2);
    }

    #[test]
    fn test_oversized_fields_rejected() {
        let huge = "x".repeat(MAX_PREFIXED_LEN + 1);
        assert!(matches!(
            DbKey::new(huge.clone()),
            Err(ValidationError::FieldTooLong { field: "dbKey", .. })
        ));
        assert!(matches!(
            DbData::byte_array(huge),
            Err(ValidationError::FieldTooLong { field: "data", .. })
        ));
        // Exactly at the limit is fine for the key
        assert!(DbKey::new("x".repeat(MAX_PREFIXED_LEN)).is_ok());
    }
}
