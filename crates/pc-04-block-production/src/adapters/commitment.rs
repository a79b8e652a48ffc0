use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::Hash;
use tracing::debug;

use crate::error::CommitmentError;
use crate::ports::CommitmentContract;

/// Records submitted roots in memory, in submission order.
///
/// Stands in for the L1 contract in tests and local deployments.
#[derive(Default)]
pub struct InMemoryCommitmentContract {
    roots: Mutex<Vec<Hash>>,
    should_fail: AtomicBool,
}

impl InMemoryCommitmentContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent submissions fail (or succeed again).
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Roots accepted so far; index `n - 1` holds block `n`.
    pub fn submitted_roots(&self) -> Vec<Hash> {
        self.roots.lock().clone()
    }

    /// Root of block `block_number`, if submitted.
    pub fn block_root(&self, block_number: u64) -> Option<Hash> {
        let index = usize::try_from(block_number.checked_sub(1)?).ok()?;
        self.roots.lock().get(index).copied()
    }
}

#[async_trait]
impl CommitmentContract for InMemoryCommitmentContract {
    async fn submit_block(&self, root: Hash) -> Result<(), CommitmentError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(CommitmentError::new("transaction reverted"));
        }
        let mut roots = self.roots.lock();
        roots.push(root);
        debug!(block_number = roots.len(), root = %hex::encode(root), "[pc-04] Root committed");
        Ok(())
    }
}
