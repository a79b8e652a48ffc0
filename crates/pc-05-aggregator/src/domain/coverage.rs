//! Coverage check on execution results.

use pc_03_state_management::TransactionResult;
use shared_types::{ranges_span, Range, StateUpdate};

use crate::error::AggregatorError;

/// The resulting update, if the verified slices span all of `range`.
pub fn check_coverage(result: TransactionResult, range: &Range) -> Result<StateUpdate, AggregatorError> {
    let Some(state_update) = result.state_update else {
        return Err(AggregatorError::NoStateUpdate { range: *range });
    };
    if !ranges_span(&result.valid_ranges, range) {
        return Err(AggregatorError::IncompleteCoverage { range: *range });
    }
    Ok(state_update)
}
