//! Block commitment: state updates keyed by range.

use pc_01_merkle_interval_tree::{MerkleIntervalTree, MerkleIntervalTreeLeafNode, MerkleTreeError};
use shared_types::{CanonicalEncoding, StateUpdate};

/// Leaf committing `update` over its range.
pub fn state_update_leaf(update: &StateUpdate) -> MerkleIntervalTreeLeafNode {
    MerkleIntervalTreeLeafNode::new(update.range.start, update.range.end, update.encode())
}

/// Tree over a block's state updates.
pub fn block_tree(updates: &[StateUpdate]) -> Result<MerkleIntervalTree, MerkleTreeError> {
    MerkleIntervalTree::new(updates.iter().map(state_update_leaf).collect())
}
