//! # Range Reconciliation
//!
//! Pure helpers that line a transaction's range up against the verified
//! state updates returned for it.

use shared_types::{Address, Range, VerifiedStateUpdate};

use super::errors::StateManagerError;

/// Verified updates whose range intersects `range`, ascending by start.
pub fn overlapping<'a>(
    verified: &'a [VerifiedStateUpdate],
    range: &Range,
) -> Vec<&'a VerifiedStateUpdate> {
    let mut hits: Vec<_> = verified
        .iter()
        .filter(|entry| entry.range.intersects(range))
        .collect();
    hits.sort_by(|a, b| a.range.start.cmp(&b.range.start));
    hits
}

/// The predicate of `first`, provided every entry in `rest` shares it.
///
/// Fails on the first entry governed by a different predicate.
pub fn common_predicate(
    first: &VerifiedStateUpdate,
    rest: &[VerifiedStateUpdate],
) -> Result<Address, StateManagerError> {
    let expected = first.state_update.state_object.predicate_address;
    for entry in rest {
        let found = entry.state_update.state_object.predicate_address;
        if found != expected {
            return Err(StateManagerError::PredicateMismatch { expected, found });
        }
    }
    Ok(expected)
}

/// Each overlapping entry clipped to `range`, in input order.
pub fn valid_ranges(overlapping: &[&VerifiedStateUpdate], range: &Range) -> Vec<Range> {
    overlapping
        .iter()
        .filter_map(|entry| entry.range.intersection(range))
        .collect()
}
