//! # Inbound Ports (Driving Ports)
//!
//! API the aggregator uses to feed and close blocks.

use async_trait::async_trait;
use shared_types::StateUpdate;

use crate::domain::SubmittedBlock;
use crate::error::Result;

/// Block production API.
#[async_trait]
pub trait BlockProductionApi: Send + Sync {
    /// Number of the block currently accepting updates.
    async fn get_next_block_number(&self) -> Result<u64>;

    /// Queue `update` for the next block.
    async fn add_pending_state_update(&self, update: &StateUpdate) -> Result<()>;

    /// Commit the pending set.
    ///
    /// Returns `None` when nothing is pending; no contract call is made.
    async fn submit_next_block(&self) -> Result<Option<SubmittedBlock>>;
}
