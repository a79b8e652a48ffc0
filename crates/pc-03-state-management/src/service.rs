//! State Manager Service
//!
//! Resolves transactions against verified range ownership. Holds no mutable
//! state, so concurrent executions never block each other.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::Transaction;
use tracing::{debug, info, warn};

use crate::domain::reconcile::{common_predicate, overlapping, valid_ranges};
use crate::domain::{StateManagerError, TransactionResult};
use crate::ports::{PluginManager, StateDb, StateManagementApi};

/// Executes transactions through the predicate that owns their range.
pub struct StateManager {
    state_db: Arc<dyn StateDb>,
    plugins: Arc<dyn PluginManager>,
}

impl StateManager {
    pub fn new(state_db: Arc<dyn StateDb>, plugins: Arc<dyn PluginManager>) -> Self {
        Self { state_db, plugins }
    }
}

#[async_trait]
impl StateManagementApi for StateManager {
    async fn execute_transaction(
        &self,
        transaction: &Transaction,
        block_number: u64,
        witness: &[u8],
    ) -> Result<TransactionResult, StateManagerError> {
        let range = transaction.range;
        let verified = self
            .state_db
            .get_verified_state_updates(range.start, range.end)
            .await?;

        let Some((first, rest)) = verified.split_first() else {
            debug!(%range, "[pc-03] No verified state for transaction range");
            return Ok(TransactionResult::empty());
        };

        let hits = overlapping(&verified, &range);
        let Some((first_hit, other_hits)) = hits.split_first() else {
            warn!(%range, returned = verified.len(), "[pc-03] Verified state returned but none overlaps");
            return Err(StateManagerError::NoOverlappingStateUpdates { range });
        };

        // Checked over everything returned, not only the overlapping entries
        let predicate = common_predicate(first, rest)?;
        let plugin = self.plugins.get_plugin(&predicate).await?;

        let state_update = plugin
            .execute_state_transition(&first_hit.state_update, transaction, witness)
            .await?;
        for previous in other_hits {
            let next = plugin
                .execute_state_transition(&previous.state_update, transaction, witness)
                .await?;
            if next != state_update {
                warn!(%range, "[pc-03] Predicate returned divergent state updates");
                return Err(StateManagerError::DivergentStateTransition { range });
            }
        }

        if state_update.plasma_block_number != block_number {
            return Err(StateManagerError::BlockNumberMismatch {
                expected: block_number,
                actual: state_update.plasma_block_number,
            });
        }

        let valid_ranges = valid_ranges(&hits, &range);
        info!(
            %range,
            block_number,
            slices = valid_ranges.len(),
            "[pc-03] Transaction executed"
        );
        Ok(TransactionResult {
            state_update: Some(state_update),
            valid_ranges,
        })
    }
}
