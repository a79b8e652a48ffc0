//! # Dispute Flow
//!
//! Decider engine (2) properties over committed blocks: "every block in a
//! span is committed with the root the operator claims" and "some block in a
//! span includes this state update". Undecided until L1 has the roots.

use std::sync::Arc;

use async_trait::async_trait;
use pc_01_merkle_interval_tree::MerkleIntervalTree;
use pc_02_decider::{
    CannotDecide, Decider, DeciderError, DeciderInput, Decision, Property, Verdict,
};
use pc_04_block_production::adapters::{InMemoryCommitmentContract, InMemoryKVStore};
use pc_04_block_production::BlockManager;
use shared_types::StateUpdate;

/// Block number carried as an 8-byte big-endian `Bytes` input.
fn block_number_input(decider: &'static str, property: &Property) -> Result<u64, DeciderError> {
    let invalid = || DeciderError::InvalidInput {
        decider,
        expected: "8-byte block number",
        actual: property.input.kind(),
    };
    let DeciderInput::Bytes(bytes) = &property.input else {
        return Err(invalid());
    };
    let bytes: [u8; 8] = bytes.as_slice().try_into().map_err(|_| invalid())?;
    Ok(u64::from_be_bytes(bytes))
}

fn external(reason: impl ToString) -> DeciderError {
    DeciderError::External {
        source_name: "block_manager",
        reason: reason.to_string(),
    }
}

/// Encode `block_number` as a decider input.
pub fn block_input(block_number: u64) -> DeciderInput {
    DeciderInput::Bytes(block_number.to_be_bytes().to_vec())
}

/// True iff the operator's archived block hashes to the root on L1.
pub struct CommittedBlockDecider {
    pub contract: Arc<InMemoryCommitmentContract>,
    pub blocks: Arc<BlockManager<InMemoryKVStore>>,
}

#[async_trait]
impl Decider for CommittedBlockDecider {
    fn name(&self) -> &'static str {
        "committed_block"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let block_number = block_number_input(self.name(), property)?;
        let Some(onchain) = self.contract.block_root(block_number) else {
            return Ok(Verdict::Undecided(CannotDecide::new(
                self.name(),
                format!("block {block_number} not yet committed"),
            )));
        };
        let local = self.blocks.block_root(block_number).await.map_err(external)?;
        Ok(Verdict::Decided(Decision::justified_by(
            local == Some(onchain),
            property,
            std::iter::empty(),
        )))
    }
}

/// True iff `target` is provably included in the given block.
pub struct IncludedInBlockDecider {
    pub target: StateUpdate,
    pub contract: Arc<InMemoryCommitmentContract>,
    pub blocks: Arc<BlockManager<InMemoryKVStore>>,
}

#[async_trait]
impl Decider for IncludedInBlockDecider {
    fn name(&self) -> &'static str {
        "included_in_block"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let block_number = block_number_input(self.name(), property)?;
        let Some(root) = self.contract.block_root(block_number) else {
            return Ok(Verdict::Undecided(CannotDecide::new(
                self.name(),
                format!("block {block_number} not yet committed"),
            )));
        };
        let proof = self
            .blocks
            .inclusion_proof(block_number, &self.target)
            .await
            .map_err(external)?;
        let included = proof.is_some_and(|proof| {
            MerkleIntervalTree::check_inclusion_proof(
                &proof.leaf,
                proof.position,
                &proof.proof,
                &root,
            )
            .is_ok()
        });
        Ok(Verdict::Decided(Decision::justified_by(
            included,
            property,
            std::iter::empty(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{account, PlasmaNode};
    use pc_02_decider::{
        AndDecider, ForAllSuchThatDecider, IntegerRangeQuantifier, NotDecider, QuantifiedInput,
        QuantifiedValue, QuantifierParameters, StaticQuantifier, ThereExistsSuchThatDecider,
    };
    use shared_types::U256;

    fn over_blocks(
        decider: Arc<dyn Decider>,
        start: u64,
        end: u64,
        per_block: Arc<dyn Decider>,
    ) -> Property {
        Property::new(
            decider,
            DeciderInput::Quantified(QuantifiedInput {
                quantifier: Arc::new(IntegerRangeQuantifier::new()),
                parameters: QuantifierParameters::IntegerRange {
                    start: U256::from(start),
                    end: U256::from(end),
                },
                property_factory: Arc::new(move |value: &QuantifiedValue| match value {
                    QuantifiedValue::Integer(n) => {
                        Property::new(per_block.clone(), block_input(n.low_u64()))
                    }
                    QuantifiedValue::Bytes(bytes) => {
                        Property::new(per_block.clone(), DeciderInput::Bytes(bytes.clone()))
                    }
                }),
            }),
        )
    }

    async fn node_with_blocks(count: u64) -> (PlasmaNode, Vec<StateUpdate>) {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        let mut updates = Vec::new();
        for i in 0..count {
            let coins = node.deposit(alice_address, i * 10, i * 10 + 10).unwrap();
            let commitment = node.transfer(&alice, coins, bob_address).await.unwrap();
            updates.push(commitment.block_transaction.state_update);
            node.aggregator.submit_next_block().await.unwrap().unwrap();
        }
        (node, updates)
    }

    fn committed(node: &PlasmaNode) -> Arc<dyn Decider> {
        Arc::new(CommittedBlockDecider {
            contract: node.contract.clone(),
            blocks: node.blocks.clone(),
        })
    }

    #[tokio::test]
    async fn test_for_all_blocks_committed() {
        let (node, _) = node_with_blocks(3).await;
        let property = over_blocks(Arc::new(ForAllSuchThatDecider), 1, 4, committed(&node));

        let decision = property.decide().await.unwrap().into_decision().unwrap();
        assert!(decision.outcome);
        assert_eq!(
            decision.trace().names(),
            vec![
                "for_all_such_that",
                "committed_block",
                "committed_block",
                "committed_block"
            ]
        );
    }

    #[tokio::test]
    async fn test_uncommitted_block_is_undecided_not_false() {
        let (node, _) = node_with_blocks(2).await;
        let property = over_blocks(Arc::new(ForAllSuchThatDecider), 1, 4, committed(&node));

        let verdict = property.decide().await.unwrap();
        assert!(!verdict.is_decided());

        // Negation of an undecided property stays undecided
        let negated = Property::new(Arc::new(NotDecider), DeciderInput::Not(Box::new(property)));
        assert_eq!(negated.decide().await.unwrap().outcome(), None);
    }

    #[tokio::test]
    async fn test_there_exists_block_including_update() {
        let (node, updates) = node_with_blocks(3).await;
        let included: Arc<dyn Decider> = Arc::new(IncludedInBlockDecider {
            target: updates[1].clone(),
            contract: node.contract.clone(),
            blocks: node.blocks.clone(),
        });
        let property = over_blocks(Arc::new(ThereExistsSuchThatDecider), 1, 4, included);

        let decision = property.decide().await.unwrap().into_decision().unwrap();
        assert!(decision.outcome);
        // Witness is block 2
        assert_eq!(decision.justification.len(), 2);
        assert_eq!(
            block_number_input("test", &decision.justification[1].implication).unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_unincluded_update_decides_false() {
        let (node, updates) = node_with_blocks(2).await;
        let mut forged = updates[0].clone();
        forged.state_object.data = vec![0; 20];
        let included: Arc<dyn Decider> = Arc::new(IncludedInBlockDecider {
            target: forged,
            contract: node.contract.clone(),
            blocks: node.blocks.clone(),
        });
        let property = over_blocks(Arc::new(ThereExistsSuchThatDecider), 1, 3, included);

        let verdict = property.decide().await.unwrap();
        assert_eq!(verdict.outcome(), Some(false));
    }

    #[tokio::test]
    async fn test_and_of_commitment_and_inclusion() {
        let (node, updates) = node_with_blocks(2).await;
        let included: Arc<dyn Decider> = Arc::new(IncludedInBlockDecider {
            target: updates[0].clone(),
            contract: node.contract.clone(),
            blocks: node.blocks.clone(),
        });
        let property = Property::new(
            Arc::new(AndDecider),
            DeciderInput::And {
                left: Box::new(over_blocks(
                    Arc::new(ForAllSuchThatDecider),
                    1,
                    3,
                    committed(&node),
                )),
                right: Box::new(Property::new(included, block_input(1))),
            },
        );

        let decision = property.decide().await.unwrap().into_decision().unwrap();
        assert!(decision.outcome);
        assert_eq!(decision.trace().names()[0], "and");
        assert_eq!(*decision.trace().names().last().unwrap(), "included_in_block");
    }

    #[tokio::test]
    async fn test_malformed_block_input_is_error() {
        let (node, _) = node_with_blocks(1).await;
        let property = Property::new(committed(&node), DeciderInput::Bytes(vec![1, 2, 3]));
        assert!(matches!(
            property.decide().await,
            Err(DeciderError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_integer_quantified_block_is_error() {
        let (node, _) = node_with_blocks(1).await;
        let per_block = committed(&node);
        let property = Property::new(
            Arc::new(ForAllSuchThatDecider),
            DeciderInput::Quantified(QuantifiedInput {
                quantifier: Arc::new(StaticQuantifier::new(
                    vec![QuantifiedValue::Bytes(vec![0xff; 3])],
                    true,
                )),
                parameters: QuantifierParameters::Custom(vec![]),
                property_factory: Arc::new(move |value: &QuantifiedValue| match value {
                    QuantifiedValue::Integer(n) => {
                        Property::new(per_block.clone(), block_input(n.low_u64()))
                    }
                    QuantifiedValue::Bytes(bytes) => {
                        Property::new(per_block.clone(), DeciderInput::Bytes(bytes.clone()))
                    }
                }),
            }),
        );

        assert!(matches!(
            property.decide().await,
            Err(DeciderError::InvalidInput {
                decider: "committed_block",
                ..
            })
        ));
    }
}
