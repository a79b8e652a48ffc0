use pc_01_merkle_interval_tree::{InclusionProof, MerkleIntervalTreeLeafNode};
use shared_types::Hash;

/// A block whose root was accepted by the commitment contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedBlock {
    pub block_number: u64,
    pub root: Hash,
    pub state_update_count: usize,
}

/// Everything a client needs to check a state update against a block root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInclusionProof {
    pub block_number: u64,
    pub root: Hash,
    pub position: usize,
    pub leaf: MerkleIntervalTreeLeafNode,
    pub proof: InclusionProof,
}
