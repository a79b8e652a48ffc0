//! Quantified deciders: `for all x such that P(x)` and its dual
//! `there exists x such that P(x)`.
//!
//! Every quantified value is evaluated in enumeration order before the
//! verdict is formed. A definite counterexample (or witness) wins even when
//! other items are undecided or the enumeration is partial; a definite answer
//! the other way needs every item decided over a complete enumeration.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{
    CannotDecide, Decision, DeciderError, DeciderInput, Property, QuantifiedInput, Verdict,
};
use crate::ports::Decider;

/// Per-item outcomes of a quantified evaluation.
struct Evaluation {
    decisions: Vec<Decision>,
    undecided: usize,
    all_results_quantified: bool,
}

impl Evaluation {
    fn first_with_outcome(&mut self, outcome: bool) -> Option<Decision> {
        let position = self.decisions.iter().position(|d| d.outcome == outcome)?;
        Some(self.decisions.swap_remove(position))
    }

    fn certain(&self) -> bool {
        self.undecided == 0 && self.all_results_quantified
    }
}

fn quantified_input<'a>(
    decider: &'static str,
    property: &'a Property,
) -> Result<&'a QuantifiedInput, DeciderError> {
    match &property.input {
        DeciderInput::Quantified(input) => Ok(input),
        other => Err(DeciderError::InvalidInput {
            decider,
            expected: "quantified",
            actual: other.kind(),
        }),
    }
}

async fn evaluate(input: &QuantifiedInput) -> Result<Evaluation, DeciderError> {
    let quantified = input
        .quantifier
        .get_all_quantified(&input.parameters)
        .await?;

    let mut evaluation = Evaluation {
        decisions: Vec::with_capacity(quantified.results.len()),
        undecided: 0,
        all_results_quantified: quantified.all_results_quantified,
    };
    for value in &quantified.results {
        let property = (input.property_factory)(value);
        match property.decide().await? {
            Verdict::Decided(decision) => evaluation.decisions.push(decision),
            Verdict::Undecided(_) => evaluation.undecided += 1,
        }
    }
    Ok(evaluation)
}

/// True iff the property holds for every quantified value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForAllSuchThatDecider;

#[async_trait]
impl Decider for ForAllSuchThatDecider {
    fn name(&self) -> &'static str {
        "for_all_such_that"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let input = quantified_input(self.name(), property)?;
        let mut evaluation = evaluate(input).await?;

        if let Some(counterexample) = evaluation.first_with_outcome(false) {
            return Ok(Verdict::Decided(Decision::justified_by(
                false,
                property,
                counterexample.justification,
            )));
        }

        if !evaluation.certain() {
            debug!(
                undecided = evaluation.undecided,
                complete = evaluation.all_results_quantified,
                "[pc-02] for_all: no counterexample but cannot certify"
            );
            return Ok(Verdict::Undecided(CannotDecide::new(
                self.name(),
                format!(
                    "{} undecided item(s), enumeration complete: {}",
                    evaluation.undecided, evaluation.all_results_quantified
                ),
            )));
        }

        Ok(Verdict::Decided(Decision::justified_by(
            true,
            property,
            evaluation
                .decisions
                .into_iter()
                .flat_map(|decision| decision.justification),
        )))
    }
}

/// True iff the property holds for at least one quantified value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThereExistsSuchThatDecider;

#[async_trait]
impl Decider for ThereExistsSuchThatDecider {
    fn name(&self) -> &'static str {
        "there_exists_such_that"
    }

    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError> {
        let input = quantified_input(self.name(), property)?;
        let mut evaluation = evaluate(input).await?;

        if let Some(witness) = evaluation.first_with_outcome(true) {
            return Ok(Verdict::Decided(Decision::justified_by(
                true,
                property,
                witness.justification,
            )));
        }

        if !evaluation.certain() {
            return Ok(Verdict::Undecided(CannotDecide::new(
                self.name(),
                format!(
                    "{} undecided item(s), enumeration complete: {}",
                    evaluation.undecided, evaluation.all_results_quantified
                ),
            )));
        }

        Ok(Verdict::Decided(Decision::justified_by(
            false,
            property,
            evaluation
                .decisions
                .into_iter()
                .flat_map(|decision| decision.justification),
        )))
    }
}
