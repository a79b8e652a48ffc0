//! # Domain Entities
//!
//! Leaf and internal nodes of the merkle interval tree, and the hashing rules
//! that bind a node's index into its parent.
//!
//! ## Node Hashing
//!
//! ```text
//! leaf   = H(start_be16 || end_be16 || data)
//! parent = H(left.index_be16 || left.hash || right.index_be16 || right.hash)
//! empty  = H("0")
//! ```
//!
//! All indices are 128-bit big-endian. `H` is Keccak-256.

use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, keccak256_many};
use shared_types::{Hash, U256};

use super::errors::MerkleTreeError;

/// Width in bytes of an encoded node index.
pub const INDEX_BYTES: usize = 16;

/// Preimage of the padding node hash.
pub const EMPTY_NODE_PREIMAGE: &[u8] = b"0";

/// A committed range and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleIntervalTreeLeafNode {
    /// Inclusive lower bound.
    pub start: U256,
    /// Exclusive upper bound.
    pub end: U256,
    /// Opaque leaf payload (usually an encoded `StateUpdate`).
    pub data: Vec<u8>,
}

impl MerkleIntervalTreeLeafNode {
    /// Create a leaf node.
    pub fn new(start: U256, end: U256, data: impl Into<Vec<u8>>) -> Self {
        Self {
            start,
            end,
            data: data.into(),
        }
    }

    /// Hash this leaf into its level-zero internal node.
    ///
    /// Fails when either bound does not fit the 128-bit index width.
    pub fn to_internal_node(&self) -> Result<MerkleIntervalTreeInternalNode, MerkleTreeError> {
        let start = to_index(self.start, "leaf start")?;
        let end = to_index(self.end, "leaf end")?;
        let hash = keccak256_many(&[&start.to_be_bytes(), &end.to_be_bytes(), &self.data]);
        Ok(MerkleIntervalTreeInternalNode { index: start, hash })
    }
}

/// A hashed node; `index` is the smallest leaf start in its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleIntervalTreeInternalNode {
    /// Smallest `start` covered by this subtree.
    pub index: u128,
    /// Keccak-256 node hash.
    pub hash: Hash,
}

impl MerkleIntervalTreeInternalNode {
    /// Padding node paired with an unpaired last node at some level.
    pub fn empty(index: u128) -> Self {
        Self {
            index,
            hash: empty_node_hash(),
        }
    }

    /// Whether this node is the padding sibling of `partner`.
    pub fn is_padding_for(&self, partner: &MerkleIntervalTreeInternalNode) -> bool {
        self.index == partner.index && self.hash == empty_node_hash()
    }

    /// Combine two children; the parent keeps the left child's index.
    pub fn parent(left: &Self, right: &Self) -> Self {
        let hash = keccak256_many(&[
            &left.index.to_be_bytes(),
            &left.hash,
            &right.index.to_be_bytes(),
            &right.hash,
        ]);
        Self {
            index: left.index,
            hash,
        }
    }

    /// Index widened to the 256-bit coin space.
    pub fn index_u256(&self) -> U256 {
        U256::from(self.index)
    }
}

/// Sibling path from leaf to root.
pub type InclusionProof = Vec<MerkleIntervalTreeInternalNode>;

/// The range a verified leaf is entitled to.
///
/// `end` is `None` for the last leaf in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitBounds {
    pub start: U256,
    pub end: Option<U256>,
}

/// Output of replaying an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootAndBounds {
    pub root: MerkleIntervalTreeInternalNode,
    pub bounds: ImplicitBounds,
}

/// Hash of the padding node, `H("0")`.
pub fn empty_node_hash() -> Hash {
    keccak256(EMPTY_NODE_PREIMAGE)
}

fn to_index(value: U256, field: &str) -> Result<u128, MerkleTreeError> {
    if value.bits() > INDEX_BYTES * 8 {
        return Err(MerkleTreeError::validation(format!(
            "{field} {value} exceeds the 128-bit index width"
        )));
    }
    Ok(value.low_u128())
}
