//! Error types for the aggregator

use pc_03_state_management::StateManagerError;
use pc_04_block_production::BlockProductionError;
use shared_crypto::CryptoError;
use shared_types::Range;
use thiserror::Error;

/// Result type alias for aggregator operations
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Errors surfaced by `Aggregator`.
///
/// Lower-level errors pass through unchanged.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Transaction execution failed
    #[error(transparent)]
    StateManager(#[from] StateManagerError),

    /// Pending set or submission failed
    #[error(transparent)]
    BlockProduction(#[from] BlockProductionError),

    /// Commitment could not be signed
    #[error("Signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// Verified state does not back the whole transaction range
    #[error("Verified state covers only part of {range}")]
    IncompleteCoverage {
        /// Transaction range
        range: Range,
    },

    /// No verified state exists for the transaction range
    #[error("Transaction over {range} produced no state update")]
    NoStateUpdate {
        /// Transaction range
        range: Range,
    },
}
