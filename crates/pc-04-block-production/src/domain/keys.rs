//! Storage key layout.
//!
//! | Key | Value |
//! |-----|-------|
//! | `m:next_block` | next block number, u64 BE |
//! | `m:pending_count` | pending update count, u64 BE |
//! | `p:{seq}` | pending `StateUpdate`, canonical bytes |
//! | `a:{block}{seq}` | archived `StateUpdate` of a finalized block |
//!
//! Numbers in keys are fixed-width big-endian so prefix scans return them in
//! numeric order.

use crate::error::KVStoreError;

/// Key namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Counters and other singletons
    Metadata,
    /// Updates waiting for the next block
    Pending,
    /// Updates of finalized blocks
    Archive,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Metadata => b"m:",
            KeyPrefix::Pending => b"p:",
            KeyPrefix::Archive => b"a:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn next_block_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"next_block")
    }

    pub fn pending_count_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"pending_count")
    }

    pub fn pending_key(seq: u64) -> Vec<u8> {
        KeyPrefix::Pending.key(&seq.to_be_bytes())
    }

    /// Prefix shared by every archived update of `block_number`.
    pub fn archive_prefix(block_number: u64) -> Vec<u8> {
        KeyPrefix::Archive.key(&block_number.to_be_bytes())
    }

    pub fn archive_key(block_number: u64, seq: u64) -> Vec<u8> {
        let mut key = Self::archive_prefix(block_number);
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }
}

/// Decode a stored u64 counter.
pub fn decode_u64(key: &[u8], bytes: &[u8]) -> Result<u64, KVStoreError> {
    let array: [u8; 8] = bytes.try_into().map_err(|_| KVStoreError::Corruption {
        message: format!(
            "counter {} has {} bytes, expected 8",
            String::from_utf8_lossy(key),
            bytes.len()
        ),
    })?;
    Ok(u64::from_be_bytes(array))
}
