//! Aggregator Service
//!
//! Turns client transactions into signed commitments and pending state
//! updates. Execution runs with no lock held; only the final
//! `add_pending_state_update` goes through the block manager's mutation
//! point, which rejects the update if a block was submitted in between.

use std::sync::Arc;

use pc_03_state_management::StateManagementApi;
use pc_04_block_production::{BlockProductionApi, SubmittedBlock};
use plasma_telemetry::{log_block_event, log_range_event};
use shared_crypto::SignatureProvider;
use shared_types::{BlockTransaction, CanonicalEncoding, Transaction};
use tracing::info;

use crate::config::AggregatorConfig;
use crate::domain::{check_coverage, BlockTransactionCommitment};
use crate::error::{AggregatorError, Result};

/// Ingests transactions for the block currently being built.
pub struct Aggregator {
    state_manager: Arc<dyn StateManagementApi>,
    blocks: Arc<dyn BlockProductionApi>,
    signer: Arc<dyn SignatureProvider>,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(
        state_manager: Arc<dyn StateManagementApi>,
        blocks: Arc<dyn BlockProductionApi>,
        signer: Arc<dyn SignatureProvider>,
        config: AggregatorConfig,
    ) -> Self {
        info!(
            require_full_coverage = config.require_full_coverage,
            "[pc-05] Initializing aggregator"
        );
        Self {
            state_manager,
            blocks,
            signer,
            config,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Execute `transaction`, sign the result, and queue it for the next block.
    ///
    /// On any failure nothing is added to the pending set.
    pub async fn ingest_transaction(
        &self,
        transaction: &Transaction,
        witness: &[u8],
    ) -> Result<BlockTransactionCommitment> {
        let block_number = self.blocks.get_next_block_number().await?;
        let result = self
            .state_manager
            .execute_transaction(transaction, block_number, witness)
            .await?;

        let state_update = if self.config.require_full_coverage {
            check_coverage(result, &transaction.range)?
        } else {
            result.state_update.ok_or(AggregatorError::NoStateUpdate {
                range: transaction.range,
            })?
        };

        let block_transaction = BlockTransaction {
            block_number,
            transaction: transaction.clone(),
            state_update,
        };
        let signature = self.signer.sign(&block_transaction.encode()).await?;
        let signer = self.signer.address().await?;

        self.blocks
            .add_pending_state_update(&block_transaction.state_update)
            .await?;

        log_range_event!(
            debug,
            "pc-05",
            "Transaction ingested",
            transaction.range,
            block_number = block_number,
            signer = %hex::encode(signer)
        );
        Ok(BlockTransactionCommitment {
            block_transaction,
            signature,
            signer,
        })
    }

    /// Commit the pending set; `None` when nothing is pending.
    pub async fn submit_next_block(&self) -> Result<Option<SubmittedBlock>> {
        let submitted = self.blocks.submit_next_block().await?;
        if let Some(block) = &submitted {
            log_block_event!(
                info,
                "pc-05",
                "Block committed",
                block.block_number,
                hex::encode(block.root),
                state_updates = block.state_update_count
            );
        }
        Ok(submitted)
    }

    pub async fn get_next_block_number(&self) -> Result<u64> {
        Ok(self.blocks.get_next_block_number().await?)
    }
}
