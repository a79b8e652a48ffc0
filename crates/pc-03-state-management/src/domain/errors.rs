use shared_types::{Address, Range};
use thiserror::Error;

/// Errors raised while executing a transaction against verified state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateManagerError {
    #[error(
        "Predicate mismatch: expected {}, found {}",
        hex::encode(expected),
        hex::encode(found)
    )]
    PredicateMismatch { expected: Address, found: Address },

    #[error("Predicate produced divergent state updates for {range}")]
    DivergentStateTransition { range: Range },

    #[error("Block number mismatch: expected {expected}, got {actual}")]
    BlockNumberMismatch { expected: u64, actual: u64 },

    #[error("No verified state update overlaps {range}")]
    NoOverlappingStateUpdates { range: Range },

    #[error("No predicate plugin registered for {}", hex::encode(.0))]
    UnknownPredicate(Address),

    #[error("Predicate {} failed: {reason}", hex::encode(address))]
    Plugin { address: Address, reason: String },

    #[error("State database error: {0}")]
    StateDb(String),
}
