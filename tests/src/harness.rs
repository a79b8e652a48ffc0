//! # Operator Harness
//!
//! Wires every subsystem together with in-memory adapters, the way an
//! operator node would at startup:
//!
//! ```text
//! PredicateRegistry ── OwnershipPredicate
//!        │
//! InMemoryStateDb ── StateManager ──┐
//!                                   ├── Aggregator ── Secp256k1SignatureProvider
//! InMemoryKVStore ── BlockManager ──┘
//!                        │
//!               InMemoryCommitmentContract
//! ```
//!
//! `verify_block` plays the client role: it checks every update of a
//! committed block against the root on L1 before trusting it as verified
//! state for later transactions.

use std::sync::{Arc, Once};

use pc_01_merkle_interval_tree::{MerkleIntervalTree, MerkleTreeError};
use pc_03_state_management::{
    InMemoryStateDb, OwnershipPredicate, PredicateRegistry, StateManager, StateManagerError,
};
use pc_04_block_production::adapters::{InMemoryCommitmentContract, InMemoryKVStore};
use pc_04_block_production::{BlockManager, BlockProductionError};
use pc_05_aggregator::{Aggregator, AggregatorConfig, AggregatorError, BlockTransactionCommitment};
use plasma_telemetry::{init_logging, TelemetryConfig};
use shared_crypto::{CryptoError, Secp256k1KeyPair, Secp256k1SignatureProvider};
use shared_types::{Address, Range, RangeError, StateUpdate, Transaction, VerifiedStateUpdate};
use thiserror::Error;

/// Address the ownership predicate is registered under.
pub const OWNERSHIP_PREDICATE: Address = [0x0c; 20];

/// Deposit contract every test range is minted through.
pub const DEPOSIT_CONTRACT: Address = [0xde; 20];

/// Attempts per transfer when a block closes between read and queue.
pub const MAX_TRANSFER_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Aggregator(#[from] AggregatorError),

    #[error(transparent)]
    BlockProduction(#[from] BlockProductionError),

    #[error(transparent)]
    MerkleTree(#[from] MerkleTreeError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Block {0} has no committed root")]
    MissingRoot(u64),

    #[error("Block {block_number} has no proof for {range}")]
    MissingProof { block_number: u64, range: Range },
}

static LOGGING: Once = Once::new();

/// Install the global subscriber once per test binary; `RUST_LOG` overrides.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::for_subsystem("00", "tests")
        };
        // Another subscriber may already be installed
        let _ = init_logging(&config);
    });
}

/// A fully wired in-memory operator.
pub struct PlasmaNode {
    pub state_db: Arc<InMemoryStateDb>,
    pub ownership: OwnershipPredicate,
    pub blocks: Arc<BlockManager<InMemoryKVStore>>,
    pub contract: Arc<InMemoryCommitmentContract>,
    pub signer: Arc<Secp256k1SignatureProvider>,
    pub aggregator: Arc<Aggregator>,
}

impl PlasmaNode {
    pub fn new() -> Result<Self, HarnessError> {
        Self::with_config(AggregatorConfig::default())
    }

    pub fn with_config(config: AggregatorConfig) -> Result<Self, HarnessError> {
        init_test_logging();
        let state_db = Arc::new(InMemoryStateDb::new());
        let ownership = OwnershipPredicate::new(OWNERSHIP_PREDICATE);

        let mut registry = PredicateRegistry::new();
        registry.register(OWNERSHIP_PREDICATE, Arc::new(ownership.clone()));
        let state_manager = Arc::new(StateManager::new(state_db.clone(), Arc::new(registry)));

        let contract = Arc::new(InMemoryCommitmentContract::new());
        let blocks = Arc::new(BlockManager::new(
            InMemoryKVStore::new(),
            contract.clone(),
            config.block_production.clone(),
        ));
        let signer = Arc::new(Secp256k1SignatureProvider::random()?);
        let aggregator = Arc::new(Aggregator::new(
            state_manager,
            blocks.clone(),
            signer.clone(),
            config,
        ));

        Ok(Self {
            state_db,
            ownership,
            blocks,
            contract,
            signer,
            aggregator,
        })
    }

    /// Mint `[start, end)` to `owner` as already verified state.
    pub fn deposit(&self, owner: Address, start: u64, end: u64) -> Result<Range, HarnessError> {
        let range = Range::from_u64(start, end)?;
        self.state_db.put_verified_state_update(VerifiedStateUpdate {
            range,
            verified_block_number: 0,
            state_update: StateUpdate {
                range,
                state_object: self.ownership.state_object(owner),
                deposit_address: DEPOSIT_CONTRACT,
                plasma_block_number: 0,
            },
        });
        Ok(range)
    }

    /// Transfer `range` from `owner` to `new_owner` in the block being built.
    ///
    /// Rebuilds and re-signs the transaction when a block closes in between.
    pub async fn transfer(
        &self,
        owner: &Secp256k1KeyPair,
        range: Range,
        new_owner: Address,
    ) -> Result<BlockTransactionCommitment, HarnessError> {
        let mut attempt = 1;
        loop {
            let block_number = self.aggregator.get_next_block_number().await?;
            let transaction = Transaction {
                deposit_address: DEPOSIT_CONTRACT,
                range,
                body: OwnershipPredicate::transaction_body(new_owner, block_number),
            };
            let witness = OwnershipPredicate::sign(owner, &transaction)?;

            match self.aggregator.ingest_transaction(&transaction, &witness).await {
                Err(
                    AggregatorError::BlockProduction(BlockProductionError::BlockNumberMismatch {
                        ..
                    })
                    | AggregatorError::StateManager(StateManagerError::BlockNumberMismatch {
                        ..
                    }),
                ) if attempt < MAX_TRANSFER_ATTEMPTS => attempt += 1,
                result => return Ok(result?),
            }
        }
    }

    /// Check block `block_number` against its L1 root and adopt its updates
    /// as verified state. Returns the number of updates adopted.
    pub async fn verify_block(&self, block_number: u64) -> Result<usize, HarnessError> {
        let root = self
            .contract
            .block_root(block_number)
            .ok_or(HarnessError::MissingRoot(block_number))?;

        let updates = self.blocks.block_state_updates(block_number).await?;
        for update in &updates {
            let proof = self
                .blocks
                .inclusion_proof(block_number, update)
                .await?
                .ok_or(HarnessError::MissingProof {
                    block_number,
                    range: update.range,
                })?;
            MerkleIntervalTree::check_inclusion_proof(
                &proof.leaf,
                proof.position,
                &proof.proof,
                &root,
            )?;
            self.state_db.put_verified_state_update(VerifiedStateUpdate {
                range: update.range,
                verified_block_number: block_number,
                state_update: update.clone(),
            });
        }
        Ok(updates.len())
    }
}

/// A key and the address it controls.
pub fn account() -> Result<(Secp256k1KeyPair, Address), HarnessError> {
    let keypair = Secp256k1KeyPair::generate();
    let address = keypair.public_key().to_address()?;
    Ok((keypair, address))
}
