//! Error types for block production subsystem

use pc_01_merkle_interval_tree::MerkleTreeError;
use shared_types::{CodecError, Range};
use thiserror::Error;

/// Result type alias for block production operations
pub type Result<T> = std::result::Result<T, BlockProductionError>;

/// Key-value store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io { message: String },

    /// Stored bytes are not what was written.
    #[error("KV store corruption: {message}")]
    Corruption { message: String },
}

/// Failure reported by the commitment contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct CommitmentError {
    pub reason: String,
}

impl CommitmentError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during block production
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockProductionError {
    /// Update targets a block other than the one being built; re-read and retry
    #[error("Block number mismatch: expected {expected}, got {actual}")]
    BlockNumberMismatch {
        /// Current next block number
        expected: u64,
        /// Block named by the update
        actual: u64,
    },

    /// Update overlaps a range already pending in this block
    #[error("Pending update for {range} overlaps an already pending update")]
    OverlappingPendingUpdate {
        /// Range of the rejected update
        range: Range,
    },

    /// Pending set reached its configured size
    #[error("Pending set is full ({max} updates)")]
    PendingSetFull {
        /// Configured maximum
        max: usize,
    },

    /// Root submission failed; nothing was finalized
    #[error("Commitment of block {block_number} failed: {source}")]
    CommitmentFailed {
        /// Block that was being submitted
        block_number: u64,
        /// Contract error
        source: CommitmentError,
    },

    /// Underlying key-value store failed
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// Stored state update could not be decoded
    #[error("Stored state update is not canonical: {0}")]
    Codec(#[from] CodecError),

    /// Block tree could not be built
    #[error("Block tree error: {0}")]
    MerkleTree(#[from] MerkleTreeError),
}
