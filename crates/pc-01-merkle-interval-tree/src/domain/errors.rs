//! # Domain Errors
//!
//! Error types for the merkle interval tree.

use shared_types::Hash;
use thiserror::Error;

/// Errors raised while building a tree or replaying an inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleTreeError {
    /// Leaf set is malformed (inverted bounds, overlap, oversized bounds).
    #[error("Invalid leaf set: {reason}")]
    Validation { reason: String },

    /// A right sibling in the proof implies a range overlapping the leaf.
    #[error("Potential intersection detected at proof level {level}")]
    PotentialIntersection { level: usize },

    /// Recomputed root differs from the committed one.
    #[error(
        "Root mismatch: expected {}, computed {}",
        hex::encode(expected),
        hex::encode(actual)
    )]
    RootMismatch { expected: Hash, actual: Hash },

    /// Leaf position is outside the tree.
    #[error("Invalid position {position} for {leaf_count} leaves")]
    InvalidPosition { position: usize, leaf_count: usize },

    /// Leaf position has more bits than the proof has levels.
    #[error("Position {position} does not fit a proof of depth {depth}")]
    PositionExceedsProof { position: usize, depth: usize },
}

impl MerkleTreeError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
