//! # Error Types
//!
//! Defines error types used across subsystems.

use primitive_types::U256;
use thiserror::Error;

/// A range whose bounds are empty or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid range: start {start} is not below end {end}")]
pub struct RangeError {
    /// Offending lower bound.
    pub start: U256,
    /// Offending upper bound.
    pub end: U256,
}

/// Errors raised while decoding canonical ABI bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before a complete word could be read.
    #[error("Input truncated: needed {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Bytes remain after the last field.
    #[error("Trailing bytes: expected {expected} bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    /// Input decodes but is not the unique canonical form.
    #[error("Non-canonical encoding: {reason}")]
    NonCanonical { reason: &'static str },

    /// A numeric field does not fit its in-memory type.
    #[error("Value overflows field {field}")]
    Overflow { field: &'static str },

    /// Decoded bounds violate `start < end`.
    #[error(transparent)]
    InvalidRange(#[from] RangeError),
}
