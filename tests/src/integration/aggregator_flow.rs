//! # Aggregator Flow
//!
//! Transaction → StateManager (3) → Aggregator (5) → BlockManager (4) →
//! CommitmentContract, then client-side verification of the committed block
//! with MerkleIntervalTree (1) proofs.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::harness::{account, PlasmaNode, DEPOSIT_CONTRACT};
    use pc_01_merkle_interval_tree::{MerkleIntervalTree, MerkleTreeError};
    use pc_03_state_management::StateManagerError;
    use pc_04_block_production::BlockProductionError;
    use pc_05_aggregator::AggregatorError;
    use shared_crypto::{Secp256k1Signature, SignatureProvider};
    use shared_types::{CanonicalEncoding, Range, StateUpdate, Transaction, U256};

    use crate::harness::HarnessError;

    fn range(start: u64, end: u64) -> Range {
        Range::from_u64(start, end).unwrap()
    }

    // =========================================================================
    // Test Group 1: Lifecycle
    // =========================================================================

    #[tokio::test]
    async fn test_transfer_commit_verify_and_spend_again() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (bob, bob_address) = account().unwrap();
        let (_, carol_address) = account().unwrap();
        let coins = node.deposit(alice_address, 0, 100).unwrap();

        // Block 1: alice -> bob
        let commitment = node.transfer(&alice, coins, bob_address).await.unwrap();
        assert_eq!(commitment.block_transaction.block_number, 1);
        assert_eq!(
            commitment.block_transaction.state_update.state_object,
            node.ownership.state_object(bob_address)
        );

        let signature: [u8; 64] = commitment.signature.as_slice().try_into().unwrap();
        node.signer
            .public_key()
            .verify(
                &commitment.block_transaction.encode(),
                &Secp256k1Signature::from_bytes(signature),
            )
            .unwrap();
        assert_eq!(commitment.signer, node.signer.address().await.unwrap());

        let block = node.aggregator.submit_next_block().await.unwrap().unwrap();
        assert_eq!(block.block_number, 1);
        assert_eq!(node.contract.block_root(1), Some(block.root));
        assert_eq!(node.verify_block(1).await.unwrap(), 1);

        // Block 2: bob -> carol, on top of the verified block 1 state
        let commitment = node.transfer(&bob, coins, carol_address).await.unwrap();
        assert_eq!(commitment.block_transaction.block_number, 2);
        node.aggregator.submit_next_block().await.unwrap().unwrap();
        node.verify_block(2).await.unwrap();

        let stored = node.state_db.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].verified_block_number, 2);
        assert_eq!(
            stored[0].state_update.state_object,
            node.ownership.state_object(carol_address)
        );
    }

    #[tokio::test]
    async fn test_previous_owner_cannot_spend_after_verification() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        let coins = node.deposit(alice_address, 0, 100).unwrap();

        node.transfer(&alice, coins, bob_address).await.unwrap();
        node.aggregator.submit_next_block().await.unwrap();
        node.verify_block(1).await.unwrap();

        let result = node.transfer(&alice, coins, alice_address).await;
        assert!(matches!(
            result,
            Err(HarnessError::Aggregator(AggregatorError::StateManager(
                StateManagerError::Plugin { .. }
            )))
        ));
        assert!(node.blocks.pending_state_updates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_transfer_splits_ownership() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        node.deposit(alice_address, 0, 100).unwrap();

        node.transfer(&alice, range(25, 75), bob_address).await.unwrap();
        node.aggregator.submit_next_block().await.unwrap();
        node.verify_block(1).await.unwrap();

        let owners: Vec<_> = node
            .state_db
            .all()
            .into_iter()
            .map(|v| (v.range, v.state_update.state_object.data))
            .collect();
        assert_eq!(
            owners,
            vec![
                (range(0, 25), alice_address.to_vec()),
                (range(25, 75), bob_address.to_vec()),
                (range(75, 100), alice_address.to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn test_transfer_beyond_deposit_rejected() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        node.deposit(alice_address, 0, 50).unwrap();

        let result = node.transfer(&alice, range(40, 60), bob_address).await;
        assert!(matches!(
            result,
            Err(HarnessError::Aggregator(AggregatorError::IncompleteCoverage { .. }))
        ));
    }

    #[tokio::test]
    async fn test_untouched_range_is_not_executable() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        node.deposit(alice_address, 0, 50).unwrap();

        let result = node.transfer(&alice, range(100, 200), alice_address).await;
        assert!(matches!(
            result,
            Err(HarnessError::Aggregator(AggregatorError::NoStateUpdate { .. }))
        ));
    }

    // =========================================================================
    // Test Group 2: Block boundaries
    // =========================================================================

    #[tokio::test]
    async fn test_stale_signed_transaction_rejected_after_block_closes() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        node.deposit(alice_address, 0, 100).unwrap();
        let coins = node.deposit(alice_address, 100, 200).unwrap();

        // Block 1 closes with an unrelated transfer
        node.transfer(&alice, range(0, 100), bob_address).await.unwrap();
        node.aggregator.submit_next_block().await.unwrap();

        // A transaction signed for block 1 is now stale
        let transaction = Transaction {
            deposit_address: DEPOSIT_CONTRACT,
            range: coins,
            body: pc_03_state_management::OwnershipPredicate::transaction_body(bob_address, 1),
        };
        let witness =
            pc_03_state_management::OwnershipPredicate::sign(&alice, &transaction).unwrap();
        let result = node
            .aggregator
            .ingest_transaction(&transaction, &witness)
            .await;
        assert!(matches!(
            result,
            Err(AggregatorError::StateManager(
                StateManagerError::BlockNumberMismatch {
                    expected: 2,
                    actual: 1
                }
            ))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_ingest_and_submit_lose_nothing() {
        let node = std::sync::Arc::new(PlasmaNode::new().unwrap());
        let mut owners = Vec::new();
        for i in 0..24u64 {
            let (keypair, address) = account().unwrap();
            let coins = node.deposit(address, i * 10, i * 10 + 10).unwrap();
            owners.push((keypair, coins));
        }
        let (_, sink) = account().unwrap();

        let mut tasks = Vec::new();
        for (i, (keypair, coins)) in owners.into_iter().enumerate() {
            let node = node.clone();
            tasks.push(tokio::spawn(async move {
                if i % 8 == 0 {
                    node.aggregator.submit_next_block().await.unwrap();
                }
                node.transfer(&keypair, coins, sink).await.unwrap()
            }));
        }

        let mut commitments = Vec::new();
        for task in tasks {
            commitments.push(task.await.unwrap());
        }
        node.aggregator.submit_next_block().await.unwrap();

        // Every accepted update is in the block it was signed for, exactly once
        let last_block = node.aggregator.get_next_block_number().await.unwrap() - 1;
        let mut committed: Vec<StateUpdate> = Vec::new();
        for n in 1..=last_block {
            committed.extend(node.blocks.block_state_updates(n).await.unwrap());
        }
        assert_eq!(committed.len(), commitments.len());
        let unique: HashSet<_> = committed.iter().map(|u| u.range).collect();
        assert_eq!(unique.len(), commitments.len());

        for commitment in &commitments {
            let n = commitment.block_transaction.block_number;
            let block = node.blocks.block_state_updates(n).await.unwrap();
            assert!(block.contains(&commitment.block_transaction.state_update));
        }
        assert!(node.blocks.pending_state_updates().await.unwrap().is_empty());
    }

    // =========================================================================
    // Test Group 3: Proofs against L1
    // =========================================================================

    #[tokio::test]
    async fn test_tampered_leaf_fails_against_committed_root() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        for i in 0..5u64 {
            node.deposit(alice_address, i * 100, i * 100 + 100).unwrap();
            node.transfer(&alice, range(i * 100, i * 100 + 100), bob_address)
                .await
                .unwrap();
        }
        node.aggregator.submit_next_block().await.unwrap();
        let root = node.contract.block_root(1).unwrap();

        let update = &node.blocks.block_state_updates(1).await.unwrap()[2];
        let proof = node.blocks.inclusion_proof(1, update).await.unwrap().unwrap();
        let bounds = MerkleIntervalTree::check_inclusion_proof(
            &proof.leaf,
            proof.position,
            &proof.proof,
            &root,
        )
        .unwrap();
        assert_eq!(bounds.start, U256::from(200));
        assert_eq!(bounds.end, Some(U256::from(300)));

        let mut forged = proof.leaf.clone();
        forged.end = U256::from(350);
        assert!(matches!(
            MerkleIntervalTree::check_inclusion_proof(&forged, proof.position, &proof.proof, &root),
            Err(MerkleTreeError::PotentialIntersection { .. })
                | Err(MerkleTreeError::RootMismatch { .. })
        ));

        let mut forged = proof.leaf.clone();
        forged.data[0] ^= 1;
        assert!(matches!(
            MerkleIntervalTree::check_inclusion_proof(&forged, proof.position, &proof.proof, &root),
            Err(MerkleTreeError::RootMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_contract_outage_then_recovery() {
        let node = PlasmaNode::new().unwrap();
        let (alice, alice_address) = account().unwrap();
        let (_, bob_address) = account().unwrap();
        let coins = node.deposit(alice_address, 0, 100).unwrap();
        node.transfer(&alice, coins, bob_address).await.unwrap();

        node.contract.set_should_fail(true);
        assert!(matches!(
            node.aggregator.submit_next_block().await,
            Err(AggregatorError::BlockProduction(
                BlockProductionError::CommitmentFailed { .. }
            ))
        ));
        assert_eq!(node.aggregator.get_next_block_number().await.unwrap(), 1);

        node.contract.set_should_fail(false);
        let block = node.aggregator.submit_next_block().await.unwrap().unwrap();
        assert_eq!(block.block_number, 1);
        assert_eq!(node.verify_block(1).await.unwrap(), 1);
    }
}
