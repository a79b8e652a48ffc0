//! # Core Domain Entities
//!
//! Defines the range-ownership entities shared by every plasma subsystem.
//!
//! ## Clusters
//!
//! - **Ranges**: `Range` (half-open `[start, end)` over the 256-bit space)
//! - **Ownership**: `StateObject`, `StateUpdate`, `VerifiedStateUpdate`
//! - **Transitions**: `Transaction`, `BlockTransaction`

use crate::errors::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte keccak256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

// =============================================================================
// CLUSTER A: RANGES
// =============================================================================

/// Half-open interval `[start, end)` of the coin space.
///
/// `Range::new` enforces `start < end`. The fields stay public so that
/// literals in tests and adapters read naturally; every decoder goes through
/// `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive lower bound.
    pub start: U256,
    /// Exclusive upper bound.
    pub end: U256,
}

impl Range {
    /// Create a range, rejecting empty or inverted bounds.
    pub fn new(start: U256, end: U256) -> Result<Self, RangeError> {
        if start >= end {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// Convenience constructor for small literal bounds.
    pub fn from_u64(start: u64, end: u64) -> Result<Self, RangeError> {
        Self::new(U256::from(start), U256::from(end))
    }

    /// Whether the two ranges share at least one point.
    pub fn intersects(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The overlapping slice of two ranges, if any.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        if !self.intersects(other) {
            return None;
        }
        Some(Range {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Whether a sorted list of ranges covers `target` without gaps.
///
/// `ranges` must be ascending by `start`; overlapping entries are tolerated.
pub fn ranges_span(ranges: &[Range], target: &Range) -> bool {
    let mut cursor = target.start;
    for range in ranges {
        if range.start > cursor {
            return false;
        }
        if range.end > cursor {
            cursor = range.end;
        }
        if cursor >= target.end {
            return true;
        }
    }
    false
}

// =============================================================================
// CLUSTER B: OWNERSHIP
// =============================================================================

/// The predicate that owns a range, plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateObject {
    /// Address of the predicate contract that governs transitions.
    pub predicate_address: Address,
    /// Predicate-specific parameters (e.g. the owner's address).
    pub data: Vec<u8>,
}

impl StateObject {
    /// Create a new state object.
    pub fn new(predicate_address: Address, data: impl Into<Vec<u8>>) -> Self {
        Self {
            predicate_address,
            data: data.into(),
        }
    }
}

/// Authoritative ownership record for a range as of a plasma block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Range this update governs.
    pub range: Range,
    /// New owner program and its parameters.
    pub state_object: StateObject,
    /// Deposit contract the range was minted through.
    pub deposit_address: Address,
    /// Block this update is committed in.
    pub plasma_block_number: u64,
}

/// A state update whose inclusion in a finalized block was checked locally.
///
/// `range` may be narrower than `state_update.range` once later updates have
/// superseded part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedStateUpdate {
    /// Portion of the update still verified as current.
    pub range: Range,
    /// Block at which inclusion was verified.
    pub verified_block_number: u64,
    /// The underlying update.
    pub state_update: StateUpdate,
}

// =============================================================================
// CLUSTER C: TRANSITIONS
// =============================================================================

/// A request to move a range to a new state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Deposit contract the range belongs to.
    pub deposit_address: Address,
    /// Range being transitioned.
    pub range: Range,
    /// Predicate-specific method call data.
    pub body: Vec<u8>,
}

/// The payload an aggregator signs when it accepts a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransaction {
    /// Block the transaction will be committed in.
    pub block_number: u64,
    /// The accepted transaction.
    pub transaction: Transaction,
    /// The resulting ownership record.
    pub state_update: StateUpdate,
}
