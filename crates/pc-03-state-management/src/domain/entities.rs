use shared_types::{Range, StateUpdate};

/// Predicate-specific proof that a transition is authorized (e.g. a signature).
pub type Witness = Vec<u8>;

/// Outcome of executing a transaction.
///
/// `state_update` is `None` when no verified state covers the transaction.
/// `valid_ranges` are the slices of the transaction's range that verified
/// state actually backed, ascending, with gaps omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionResult {
    pub state_update: Option<StateUpdate>,
    pub valid_ranges: Vec<Range>,
}

impl TransactionResult {
    /// Result for a transaction with no verified history.
    pub fn empty() -> Self {
        Self::default()
    }
}
