//! # Domain Errors
//!
//! Hard failures of the decider engine. "Cannot decide yet" is a `Verdict`,
//! never one of these.

use shared_types::U256;
use thiserror::Error;

/// Decider engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeciderError {
    /// A decider was handed an input shape it does not understand.
    #[error("Decider {decider} expected {expected} input, got {actual}")]
    InvalidInput {
        decider: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Quantifier parameters are malformed.
    #[error("Quantifier {quantifier} rejected parameters: {reason}")]
    InvalidParameters {
        quantifier: &'static str,
        reason: String,
    },

    /// Enumeration would exceed the configured bound.
    #[error("Quantifier {quantifier} would enumerate {requested} values (max {max})")]
    EnumerationTooLarge {
        quantifier: &'static str,
        requested: U256,
        max: u64,
    },

    /// An external data source failed.
    #[error("External failure in {source_name}: {reason}")]
    External {
        source_name: &'static str,
        reason: String,
    },
}
