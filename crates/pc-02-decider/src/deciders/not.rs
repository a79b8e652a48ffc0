//! Negation decider.

use async_trait::async_trait;

use crate::domain::{Decision, DeciderError, DeciderInput, Property, Verdict};
use crate::ports::Decider;

/// Decides `!inner`; an undecided inner stays undecided.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotDecider;

#[async_trait]
impl Decider for NotDecider {
    fn name(&self) -> &'static str {
        "not"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let DeciderInput::Not(inner) = &property.input else {
            return Err(DeciderError::InvalidInput {
                decider: self.name(),
                expected: "not",
                actual: property.input.kind(),
            });
        };

        Ok(match inner.decide().await? {
            Verdict::Decided(decision) => Verdict::Decided(Decision::justified_by(
                !decision.outcome,
                property,
                decision.justification,
            )),
            undecided => undecided,
        })
    }
}
