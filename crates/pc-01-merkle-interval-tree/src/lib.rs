//! # Merkle Interval Tree (pc-01)
//!
//! Commits a block's state updates, keyed by range, into a single root that
//! the commitment contract stores on L1. Inclusion proofs certify both that a
//! leaf is in the tree and that no other committed leaf overlaps the range
//! it implicitly owns.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Leaves sorted ascending by `start` | sorted in `MerkleIntervalTree::new` |
//! | Leaves pairwise disjoint | rejected in `MerkleIntervalTree::new` |
//! | Node index is the smallest start in its subtree | `parent` keeps `left.index` |
//! | Right siblings start after the leaf, strictly increasing | `root_and_bounds` |
//!
//! ## Usage
//!
//! ```ignore
//! let tree = MerkleIntervalTree::new(leaves)?;
//! let proof = tree.inclusion_proof(position)?;
//! let bounds = MerkleIntervalTree::check_inclusion_proof(&leaf, position, &proof, &root)?;
//! ```

pub mod domain;

pub use domain::{
    empty_node_hash, ImplicitBounds, InclusionProof, MerkleIntervalTree,
    MerkleIntervalTreeInternalNode, MerkleIntervalTreeLeafNode, MerkleTreeError, RootAndBounds,
    EMPTY_NODE_PREIMAGE, INDEX_BYTES,
};
