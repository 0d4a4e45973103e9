//! Document identifier type.
//!
//! This module defines [`DocumentId`], the 12-byte identifier assigned to every
//! stored document. Its text form is 24 lowercase hexadecimal characters, which
//! keeps it interchangeable with document-database object ids.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentifierError;

/// Length of a document identifier in bytes.
pub const ID_BYTES: usize = 12;

/// A 12-byte document identifier.
///
/// The first four bytes hold the big-endian creation time in seconds; the
/// remaining eight are random.
///
/// # Examples
///
/// ```
/// use roster_persistence::types::DocumentId;
///
/// let id = DocumentId::parse("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
/// assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
///
/// assert!(DocumentId::parse("not-an-id").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; ID_BYTES]);

impl DocumentId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let mut bytes = [0u8; ID_BYTES];
        let seconds = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&uuid::Uuid::new_v4().as_bytes()[..8]);
        Self(bytes)
    }

    /// Parses the 24-character hexadecimal form (either case).
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let malformed = || IdentifierError::Malformed {
            value: value.to_string(),
        };

        if value.len() != ID_BYTES * 2 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let mut bytes = [0u8; ID_BYTES];
        for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ID_BYTES] {
        &self.0
    }

    /// Returns the lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Value of an ASCII hex digit. Callers check the digit first.
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
