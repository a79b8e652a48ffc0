//! # Inbound Ports
//!
//! API exposed to the aggregator.

use async_trait::async_trait;
use shared_types::Transaction;

use crate::domain::{StateManagerError, TransactionResult};

/// Transaction execution against verified state.
#[async_trait]
pub trait StateManagementApi: Send + Sync {
    /// Resolve `transaction` into the update it produces at `block_number`.
    ///
    /// Either fully succeeds or has no observable effect.
    async fn execute_transaction(
        &self,
        transaction: &Transaction,
        block_number: u64,
        witness: &[u8],
    ) -> Result<TransactionResult, StateManagerError>;
}
