//! Constant decider.
//!
//! Always answers the same way. Stands in for on-chain or state-backed
//! deciders when wiring property trees together.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{CannotDecide, Decision, DeciderError, Property, Verdict};
use crate::ports::Decider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Outcome(bool),
    Undecided,
    Fail,
}

/// A decider with a fixed answer that counts how often it was consulted.
#[derive(Debug)]
pub struct ConstantDecider {
    name: &'static str,
    answer: Answer,
    calls: AtomicUsize,
}

impl ConstantDecider {
    fn with_answer(name: &'static str, answer: Answer) -> Self {
        Self {
            name,
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always decides `outcome`.
    pub fn decided(name: &'static str, outcome: bool) -> Self {
        Self::with_answer(name, Answer::Outcome(outcome))
    }

    /// Always cannot decide.
    pub fn undecided(name: &'static str) -> Self {
        Self::with_answer(name, Answer::Undecided)
    }

    /// Always fails with an external error.
    pub fn failing(name: &'static str) -> Self {
        Self::with_answer(name, Answer::Fail)
    }

    /// Number of `decide` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Decider for ConstantDecider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Answer::Outcome(outcome) => Ok(Verdict::Decided(Decision::justified_by(
                outcome,
                property,
                [],
            ))),
            Answer::Undecided => Ok(Verdict::Undecided(CannotDecide::new(
                self.name,
                "answer not yet available",
            ))),
            Answer::Fail => Err(DeciderError::External {
                source_name: self.name,
                reason: "configured to fail".into(),
            }),
        }
    }
}
