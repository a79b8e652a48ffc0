//! Block Database
//!
//! Persists the pending state updates of the block being built, the next
//! block number, and the updates of every finalized block. Not synchronized
//! itself; `BlockManager` is the single writer.

use shared_types::{CanonicalEncoding, StateUpdate};
use tracing::info;

use crate::domain::keys::{decode_u64, KeyPrefix};
use crate::error::Result;
use crate::ports::{BatchOperation, KeyValueStore};

/// First block number of a fresh chain.
pub const GENESIS_BLOCK_NUMBER: u64 = 1;

/// Pending-set and block-counter storage over a `KeyValueStore`.
pub struct BlockDb<KV: KeyValueStore> {
    kv: KV,
}

impl<KV: KeyValueStore> BlockDb<KV> {
    pub fn new(kv: KV) -> Self {
        Self { kv }
    }

    /// Number of the block currently being built.
    pub fn get_next_block_number(&self) -> Result<u64> {
        self.read_counter(&KeyPrefix::next_block_key(), GENESIS_BLOCK_NUMBER)
    }

    /// Number of updates waiting for the next block.
    pub fn pending_count(&self) -> Result<u64> {
        self.read_counter(&KeyPrefix::pending_count_key(), 0)
    }

    /// Append `update` to the pending set.
    pub fn add_pending_state_update(&mut self, update: &StateUpdate) -> Result<()> {
        let seq = self.pending_count()?;
        self.kv.atomic_batch_write(vec![
            BatchOperation::put(KeyPrefix::pending_key(seq), update.encode()),
            BatchOperation::put(KeyPrefix::pending_count_key(), (seq + 1).to_be_bytes()),
        ])?;
        Ok(())
    }

    /// Pending updates in insertion order.
    pub fn get_pending_state_updates(&self) -> Result<Vec<StateUpdate>> {
        self.decode_all(KeyPrefix::Pending.as_bytes())
    }

    /// Updates of finalized block `block_number`, in insertion order.
    pub fn get_block_state_updates(&self, block_number: u64) -> Result<Vec<StateUpdate>> {
        self.decode_all(&KeyPrefix::archive_prefix(block_number))
    }

    /// Archive the pending set under the current block, clear it, and advance
    /// the block counter, all in one atomic batch.
    ///
    /// On failure nothing changes, so the call can be retried.
    pub fn finalize_next_block(&mut self) -> Result<u64> {
        let block_number = self.get_next_block_number()?;
        let pending = self.kv.prefix_scan(KeyPrefix::Pending.as_bytes())?;

        let mut batch = Vec::with_capacity(pending.len() * 2 + 2);
        for (seq, (key, value)) in (0u64..).zip(pending) {
            batch.push(BatchOperation::put(
                KeyPrefix::archive_key(block_number, seq),
                value,
            ));
            batch.push(BatchOperation::delete(key));
        }
        batch.push(BatchOperation::put(
            KeyPrefix::pending_count_key(),
            0u64.to_be_bytes(),
        ));
        batch.push(BatchOperation::put(
            KeyPrefix::next_block_key(),
            (block_number + 1).to_be_bytes(),
        ));

        self.kv.atomic_batch_write(batch)?;
        info!(block_number, "[pc-04] Finalized block");
        Ok(block_number)
    }

    /// Mutably borrow the underlying store.
    pub fn store_mut(&mut self) -> &mut KV {
        &mut self.kv
    }

    fn read_counter(&self, key: &[u8], default: u64) -> Result<u64> {
        match self.kv.get(key)? {
            Some(bytes) => Ok(decode_u64(key, &bytes)?),
            None => Ok(default),
        }
    }

    fn decode_all(&self, prefix: &[u8]) -> Result<Vec<StateUpdate>> {
        self.kv
            .prefix_scan(prefix)?
            .into_iter()
            .map(|(_, value)| StateUpdate::decode(&value).map_err(Into::into))
            .collect()
    }
}
