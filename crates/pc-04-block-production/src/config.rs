//! Configuration types for block production

use serde::Deserialize;

/// Default cap on updates waiting for the next block.
pub const DEFAULT_MAX_PENDING_UPDATES: usize = 10_000;

/// Runtime configuration for block production
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlockProductionConfig {
    /// Maximum number of pending state updates per block
    pub max_pending_updates: usize,
}

impl Default for BlockProductionConfig {
    fn default() -> Self {
        Self {
            max_pending_updates: DEFAULT_MAX_PENDING_UPDATES,
        }
    }
}
