use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Range, VerifiedStateUpdate, U256};
use tracing::debug;

use crate::domain::StateManagerError;
use crate::ports::StateDb;

/// In-memory verified state, kept sorted and pairwise disjoint.
///
/// Storing an update supersedes whatever part of older entries it covers;
/// the older entries survive only outside the new range.
#[derive(Default)]
pub struct InMemoryStateDb {
    entries: RwLock<Vec<VerifiedStateUpdate>>,
}

impl InMemoryStateDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verified update, clipping any overlapped entries.
    pub fn put_verified_state_update(&self, update: VerifiedStateUpdate) {
        let mut entries = self.entries.write();
        let incoming = update.range;

        let mut kept = Vec::with_capacity(entries.len() + 2);
        for entry in entries.drain(..) {
            if !entry.range.intersects(&incoming) {
                kept.push(entry);
                continue;
            }
            if entry.range.start < incoming.start {
                kept.push(VerifiedStateUpdate {
                    range: Range {
                        start: entry.range.start,
                        end: incoming.start,
                    },
                    ..entry.clone()
                });
            }
            if entry.range.end > incoming.end {
                kept.push(VerifiedStateUpdate {
                    range: Range {
                        start: incoming.end,
                        end: entry.range.end,
                    },
                    ..entry
                });
            }
        }
        kept.push(update);
        kept.sort_by(|a, b| a.range.start.cmp(&b.range.start));

        debug!(range = %incoming, entries = kept.len(), "[pc-03] Stored verified state update");
        *entries = kept;
    }

    /// Snapshot of every stored entry, ascending by start.
    pub fn all(&self) -> Vec<VerifiedStateUpdate> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl StateDb for InMemoryStateDb {
    async fn get_verified_state_updates(
        &self,
        start: U256,
        end: U256,
    ) -> Result<Vec<VerifiedStateUpdate>, StateManagerError> {
        let query = Range::new(start, end).map_err(|e| StateManagerError::StateDb(e.to_string()))?;
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|entry| entry.range.intersects(&query))
            .cloned()
            .collect())
    }
}
