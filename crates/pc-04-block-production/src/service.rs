//! Block Manager Service
//!
//! Single mutation point for the pending set and block counter. Every write
//! goes through one `tokio::sync::Mutex`; `submit_next_block` holds it from
//! reading the pending set until finalization, so an update ingested
//! concurrently lands either in the committed block or in the next one.

use std::sync::Arc;

use async_trait::async_trait;
use pc_01_merkle_interval_tree::MerkleTreeError;
use shared_types::{CanonicalEncoding, Hash, StateUpdate};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::block_db::BlockDb;
use crate::config::BlockProductionConfig;
use crate::domain::{block_tree, state_update_leaf, BlockInclusionProof, SubmittedBlock};
use crate::error::{BlockProductionError, Result};
use crate::ports::{BlockProductionApi, CommitmentContract, KeyValueStore};

/// Owns the block database and submits finalized roots.
pub struct BlockManager<KV: KeyValueStore> {
    /// Held across the L1 `submit_block` call: ingestion stalls for as long
    /// as the contract takes. Callers bound that with their own timeouts.
    db: Mutex<BlockDb<KV>>,
    commitment: Arc<dyn CommitmentContract>,
    config: BlockProductionConfig,
}

impl<KV: KeyValueStore> BlockManager<KV> {
    pub fn new(
        kv: KV,
        commitment: Arc<dyn CommitmentContract>,
        config: BlockProductionConfig,
    ) -> Self {
        info!(
            max_pending_updates = config.max_pending_updates,
            "[pc-04] Initializing block manager"
        );
        Self {
            db: Mutex::new(BlockDb::new(kv)),
            commitment,
            config,
        }
    }

    pub fn config(&self) -> &BlockProductionConfig {
        &self.config
    }

    /// Snapshot of the pending set, in insertion order.
    pub async fn pending_state_updates(&self) -> Result<Vec<StateUpdate>> {
        self.db.lock().await.get_pending_state_updates()
    }

    /// Updates committed in block `block_number`; empty if not finalized.
    pub async fn block_state_updates(&self, block_number: u64) -> Result<Vec<StateUpdate>> {
        self.db.lock().await.get_block_state_updates(block_number)
    }

    /// Root of finalized block `block_number`, recomputed from the archive.
    pub async fn block_root(&self, block_number: u64) -> Result<Option<Hash>> {
        let updates = self.block_state_updates(block_number).await?;
        Ok(block_tree(&updates)?.root_hash())
    }

    /// Proof that `update` was committed in block `block_number`.
    ///
    /// `None` if the block does not contain exactly this update.
    pub async fn inclusion_proof(
        &self,
        block_number: u64,
        update: &StateUpdate,
    ) -> Result<Option<BlockInclusionProof>> {
        let updates = self.block_state_updates(block_number).await?;
        let tree = block_tree(&updates)?;
        let (Some(root), Some(position)) = (tree.root_hash(), tree.position_of(update.range.start))
        else {
            return Ok(None);
        };

        let leaf = tree.leaves()[position].clone();
        if leaf.end != update.range.end || leaf.data != update.encode() {
            return Ok(None);
        }
        let proof = tree.inclusion_proof(position)?;
        Ok(Some(BlockInclusionProof {
            block_number,
            root,
            position,
            leaf,
            proof,
        }))
    }

    fn root_of(pending: &[StateUpdate]) -> Result<Hash> {
        let root = block_tree(pending)?
            .root_hash()
            .ok_or_else(|| MerkleTreeError::Validation {
                reason: "block has no state updates".into(),
            })?;
        Ok(root)
    }
}

#[async_trait]
impl<KV: KeyValueStore + 'static> BlockProductionApi for BlockManager<KV> {
    async fn get_next_block_number(&self) -> Result<u64> {
        self.db.lock().await.get_next_block_number()
    }

    async fn add_pending_state_update(&self, update: &StateUpdate) -> Result<()> {
        // Bounds must fit a tree index before the update can be committed
        state_update_leaf(update).to_internal_node()?;

        let mut db = self.db.lock().await;
        let expected = db.get_next_block_number()?;
        if update.plasma_block_number != expected {
            return Err(BlockProductionError::BlockNumberMismatch {
                expected,
                actual: update.plasma_block_number,
            });
        }

        let pending = db.get_pending_state_updates()?;
        if pending.len() >= self.config.max_pending_updates {
            warn!(block_number = expected, "[pc-04] Pending set full");
            return Err(BlockProductionError::PendingSetFull {
                max: self.config.max_pending_updates,
            });
        }
        if pending.iter().any(|p| p.range.intersects(&update.range)) {
            return Err(BlockProductionError::OverlappingPendingUpdate {
                range: update.range,
            });
        }

        db.add_pending_state_update(update)?;
        debug!(
            block_number = expected,
            range = %update.range,
            pending = pending.len() + 1,
            "[pc-04] Added pending state update"
        );
        Ok(())
    }

    async fn submit_next_block(&self) -> Result<Option<SubmittedBlock>> {
        let mut db = self.db.lock().await;
        let pending = db.get_pending_state_updates()?;
        if pending.is_empty() {
            debug!("[pc-04] Nothing pending, skipping block submission");
            return Ok(None);
        }

        let block_number = db.get_next_block_number()?;
        let root = Self::root_of(&pending)?;

        self.commitment
            .submit_block(root)
            .await
            .map_err(|source| {
                warn!(block_number, error = %source, "[pc-04] Root submission failed");
                BlockProductionError::CommitmentFailed {
                    block_number,
                    source,
                }
            })?;

        if let Err(e) = db.finalize_next_block() {
            // L1 holds the root but the local counter did not move
            error!(
                block_number,
                root = %hex::encode(root),
                error = %e,
                "[pc-04] Root committed but finalization failed; reconcile before the next submission"
            );
            return Err(e);
        }

        info!(
            block_number,
            root = %hex::encode(root),
            state_updates = pending.len(),
            "[pc-04] Block submitted"
        );
        Ok(Some(SubmittedBlock {
            block_number,
            root,
            state_update_count: pending.len(),
        }))
    }
}
