//! # Merkle Interval Tree
//!
//! Binary merkle tree over sorted, pairwise disjoint ranges. Proofs carry each
//! sibling's index, so a verifier can recompute the root and also learn the
//! implicit range the leaf owns: everything from its own start up to the
//! first committed range to its right.
//!
//! ## Construction
//!
//! Levels are built bottom-up. An unpaired last node is hashed together with
//! a padding node (`H("0")`, same index as the node it pads), so every parent
//! has two children. A single leaf is its own root.

use shared_types::{Hash, U256};
use tracing::debug;

use super::entities::{
    ImplicitBounds, InclusionProof, MerkleIntervalTreeInternalNode, MerkleIntervalTreeLeafNode,
    RootAndBounds,
};
use super::errors::MerkleTreeError;

/// A merkle commitment to a set of non-overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleIntervalTree {
    /// Leaves sorted ascending by `start`.
    leaves: Vec<MerkleIntervalTreeLeafNode>,
    /// `levels[0]` holds the hashed leaves, the last level holds the root.
    levels: Vec<Vec<MerkleIntervalTreeInternalNode>>,
}

impl MerkleIntervalTree {
    /// Build a tree, sorting leaves by `(start, end, data)`.
    ///
    /// Rejects inverted bounds and any pair of overlapping leaves before
    /// hashing anything.
    pub fn new(mut leaves: Vec<MerkleIntervalTreeLeafNode>) -> Result<Self, MerkleTreeError> {
        for leaf in &leaves {
            if leaf.start > leaf.end {
                return Err(MerkleTreeError::validation(format!(
                    "leaf start {} is greater than end {}",
                    leaf.start, leaf.end
                )));
            }
        }

        // Full key: a zero-width leaf sharing a start must sort first
        leaves.sort_by(|a, b| (a.start, a.end, &a.data).cmp(&(b.start, b.end, &b.data)));

        if leaves.windows(2).any(|pair| pair[0].end > pair[1].start) {
            return Err(MerkleTreeError::validation("leaves must not overlap"));
        }

        let bottom = leaves
            .iter()
            .map(MerkleIntervalTreeLeafNode::to_internal_node)
            .collect::<Result<Vec<_>, _>>()?;

        let levels = Self::build_levels(bottom);

        debug!(
            leaves = leaves.len(),
            depth = levels.len().saturating_sub(1),
            "[pc-01] Built merkle interval tree"
        );

        Ok(Self { leaves, levels })
    }

    fn build_levels(
        bottom: Vec<MerkleIntervalTreeInternalNode>,
    ) -> Vec<Vec<MerkleIntervalTreeInternalNode>> {
        if bottom.is_empty() {
            return Vec::new();
        }

        let mut levels = vec![bottom];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair
                        .get(1)
                        .copied()
                        .unwrap_or_else(|| MerkleIntervalTreeInternalNode::empty(left.index));
                    MerkleIntervalTreeInternalNode::parent(left, &right)
                })
                .collect();
            levels.push(next);
        }
        levels
    }

    /// Root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&MerkleIntervalTreeInternalNode> {
        self.levels.last().and_then(|level| level.first())
    }

    /// Root hash, or `None` for an empty tree.
    pub fn root_hash(&self) -> Option<Hash> {
        self.root().map(|node| node.hash)
    }

    /// Leaves in sorted order; positions index into this slice.
    pub fn leaves(&self) -> &[MerkleIntervalTreeLeafNode] {
        &self.leaves
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Position of the leaf starting at `start`, if any.
    pub fn position_of(&self, start: U256) -> Option<usize> {
        self.leaves
            .binary_search_by(|leaf| leaf.start.cmp(&start))
            .ok()
    }

    /// Sibling path for the leaf at `position`, leaf-to-root.
    pub fn inclusion_proof(&self, position: usize) -> Result<InclusionProof, MerkleTreeError> {
        if position >= self.leaves.len() {
            return Err(MerkleTreeError::InvalidPosition {
                position,
                leaf_count: self.leaves.len(),
            });
        }

        let mut proof = InclusionProof::with_capacity(self.levels.len().saturating_sub(1));
        let mut index = position;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = level
                .get(index ^ 1)
                .copied()
                .unwrap_or_else(|| MerkleIntervalTreeInternalNode::empty(level[index].index));
            proof.push(sibling);
            index >>= 1;
        }
        Ok(proof)
    }

    /// Replay `proof` for `leaf` at `position`, returning the recomputed root
    /// and the leaf's implicit bounds.
    ///
    /// Bit `i` of `position` (LSB first) tells whether the sibling at level `i`
    /// sits on the left (`1`) or the right (`0`). Every real right sibling
    /// must start at or after `leaf.end` and strictly after the previous right
    /// sibling; anything else means the prover could be hiding an overlapping
    /// range. Padding siblings carry no range and are exempt.
    pub fn root_and_bounds(
        leaf: &MerkleIntervalTreeLeafNode,
        position: usize,
        proof: &[MerkleIntervalTreeInternalNode],
    ) -> Result<RootAndBounds, MerkleTreeError> {
        if leaf.start > leaf.end {
            return Err(MerkleTreeError::validation(format!(
                "leaf start {} is greater than end {}",
                leaf.start, leaf.end
            )));
        }
        let depth = proof.len();
        if depth < usize::BITS as usize && position >> depth != 0 {
            return Err(MerkleTreeError::PositionExceedsProof { position, depth });
        }

        let mut computed = leaf.to_internal_node()?;
        let mut first_right: Option<U256> = None;
        let mut previous_right: Option<u128> = None;

        for (level, sibling) in proof.iter().enumerate() {
            let sibling_is_left = (position >> level) & 1 == 1;
            if sibling_is_left {
                computed = MerkleIntervalTreeInternalNode::parent(sibling, &computed);
                continue;
            }

            if !sibling.is_padding_for(&computed) {
                let overlaps_leaf = sibling.index_u256() < leaf.end;
                let not_increasing = previous_right.is_some_and(|prev| sibling.index <= prev);
                if overlaps_leaf || not_increasing {
                    return Err(MerkleTreeError::PotentialIntersection { level });
                }
                first_right.get_or_insert(sibling.index_u256());
                previous_right = Some(sibling.index);
            }
            computed = MerkleIntervalTreeInternalNode::parent(&computed, sibling);
        }

        let start = if position == 0 { U256::zero() } else { leaf.start };
        Ok(RootAndBounds {
            root: computed,
            bounds: ImplicitBounds {
                start,
                end: first_right,
            },
        })
    }

    /// Verify `proof` against a committed root hash.
    ///
    /// Returns the implicit bounds on success.
    pub fn check_inclusion_proof(
        leaf: &MerkleIntervalTreeLeafNode,
        position: usize,
        proof: &[MerkleIntervalTreeInternalNode],
        root_hash: &Hash,
    ) -> Result<ImplicitBounds, MerkleTreeError> {
        let RootAndBounds { root, bounds } = Self::root_and_bounds(leaf, position, proof)?;
        if root.hash != *root_hash {
            return Err(MerkleTreeError::RootMismatch {
                expected: *root_hash,
                actual: root.hash,
            });
        }
        Ok(bounds)
    }
}
