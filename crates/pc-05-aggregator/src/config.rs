//! Aggregator configuration

use pc_04_block_production::BlockProductionConfig;
use serde::Deserialize;

/// Runtime configuration for the aggregator.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Reject transactions whose verified slices leave part of the range
    /// uncovered, or that produce no state update.
    pub require_full_coverage: bool,

    /// Block production settings.
    pub block_production: BlockProductionConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            require_full_coverage: true,
            block_production: BlockProductionConfig::default(),
        }
    }
}
