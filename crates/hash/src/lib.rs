#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! BLAKE3 digests for mso
//!
//! Renamed tables carry a digest of their original name so that two orphan
//! tables can never collide on the same relabeled name.

use serde::Serialize;
use std::fmt;

/// Shortest digest suffix ever emitted, whatever the identifier budget
pub const MIN_DIGEST_HEX: usize = 16;

/// Longest digest suffix emitted (160 bits)
pub const MAX_DIGEST_HEX: usize = 40;

/// A BLAKE3 hash value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hash {
    bytes: [u8; 32],
}

impl Hash {
    /// Create a hash from raw bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Leading `len` hex characters (clamped to the full 64)
    #[must_use]
    pub fn to_hex_prefix(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }

    /// Compute hash of a byte slice
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::from_bytes(*hash.as_bytes())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Digest suffix for a relabeled table name.
///
/// `budget` is the number of characters left for the digest after the
/// prefix, label and separator; the result is clamped to
/// `MIN_DIGEST_HEX..=MAX_DIGEST_HEX`.
#[must_use]
pub fn name_digest(original: &str, budget: usize) -> String {
    let len = budget.clamp(MIN_DIGEST_HEX, MAX_DIGEST_HEX);
    Hash::from_data(original.as_bytes()).to_hex_prefix(len)
}
