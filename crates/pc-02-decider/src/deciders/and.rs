//! Conjunction decider.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Decision, DeciderError, DeciderInput, Property, Verdict};
use crate::ports::Decider;

/// Decides `left && right`, short-circuiting on a false left.
///
/// | left | right | result |
/// |------|-------|--------|
/// | undecided | (not evaluated) | undecided |
/// | false | (not evaluated) | false, `[self, ..left]` |
/// | true | undecided | undecided |
/// | true | b | b, `[self, ..left, ..right]` |
#[derive(Debug, Default, Clone, Copy)]
pub struct AndDecider;

#[async_trait]
impl Decider for AndDecider {
    fn name(&self) -> &'static str {
        "and"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let DeciderInput::And { left, right } = &property.input else {
            return Err(DeciderError::InvalidInput {
                decider: self.name(),
                expected: "and",
                actual: property.input.kind(),
            });
        };

        let left = match left.decide().await? {
            Verdict::Decided(decision) => decision,
            undecided @ Verdict::Undecided(_) => return Ok(undecided),
        };
        if !left.outcome {
            debug!("[pc-02] and: left is false, skipping right");
            return Ok(Verdict::Decided(Decision::justified_by(
                false,
                property,
                left.justification,
            )));
        }

        let right = match right.decide().await? {
            Verdict::Decided(decision) => decision,
            undecided @ Verdict::Undecided(_) => return Ok(undecided),
        };
        Ok(Verdict::Decided(Decision::justified_by(
            right.outcome,
            property,
            left.justification.into_iter().chain(right.justification),
        )))
    }
}
