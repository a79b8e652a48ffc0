//! # Domain Entities
//!
//! Properties, decisions and the tri-state verdict.
//!
//! ## Clusters
//!
//! - **Requests**: `Property`, `DeciderInput`, `QuantifiedInput`
//! - **Responses**: `Verdict`, `Decision`, `CannotDecide`, `ImplicationProofItem`
//! - **Quantification**: `QuantifierParameters`, `QuantifiedValue`, `QuantifierResult`

use std::fmt;
use std::sync::Arc;

use shared_types::U256;

use super::errors::DeciderError;
use crate::ports::{Decider, Quantifier};

// =============================================================================
// CLUSTER A: REQUESTS
// =============================================================================

/// A decider paired with the input it should evaluate.
#[derive(Clone)]
pub struct Property {
    pub decider: Arc<dyn Decider>,
    pub input: DeciderInput,
}

impl Property {
    /// Create a property.
    pub fn new(decider: Arc<dyn Decider>, input: DeciderInput) -> Self {
        Self { decider, input }
    }

    /// Evaluate this property with its own decider.
    pub async fn decide(&self) -> Result<Verdict, DeciderError> {
        self.decider.decide(self).await
    }

    /// This property as a justification entry.
    pub fn as_proof_item(&self) -> ImplicationProofItem {
        ImplicationProofItem {
            implication: self.clone(),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("decider", &self.decider.name())
            .field("input", &self.input)
            .finish()
    }
}

/// Builds the property to check for one quantified value.
pub type PropertyFactory = Arc<dyn Fn(&QuantifiedValue) -> Property + Send + Sync>;

/// Input accepted by the built-in deciders.
#[derive(Clone)]
pub enum DeciderInput {
    /// Conjunction, evaluated left first.
    And {
        left: Box<Property>,
        right: Box<Property>,
    },
    /// Negation of a single property.
    Not(Box<Property>),
    /// Quantified property for the `for all` and `there exists` deciders.
    Quantified(QuantifiedInput),
    /// Opaque input for externally defined deciders.
    Bytes(Vec<u8>),
}

impl DeciderInput {
    /// Short label for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::And { .. } => "and",
            Self::Not(_) => "not",
            Self::Quantified(_) => "quantified",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Debug for DeciderInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And { left, right } => f
                .debug_struct("And")
                .field("left", left)
                .field("right", right)
                .finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Self::Quantified(input) => f
                .debug_struct("Quantified")
                .field("quantifier", &input.quantifier.name())
                .field("parameters", &input.parameters)
                .finish_non_exhaustive(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
        }
    }
}

/// A quantifier, its parameters and the per-value property builder.
#[derive(Clone)]
pub struct QuantifiedInput {
    pub quantifier: Arc<dyn Quantifier>,
    pub parameters: QuantifierParameters,
    pub property_factory: PropertyFactory,
}

// =============================================================================
// CLUSTER B: RESPONSES
// =============================================================================

/// One entry of a decision's replayable trace.
#[derive(Clone, Debug)]
pub struct ImplicationProofItem {
    pub implication: Property,
}

/// A definite answer plus the ordered trace of properties consulted.
#[derive(Clone, Debug)]
pub struct Decision {
    pub outcome: bool,
    pub justification: Vec<ImplicationProofItem>,
}

impl Decision {
    /// Decision whose trace starts with `head` followed by `rest`.
    pub fn justified_by(
        outcome: bool,
        head: &Property,
        rest: impl IntoIterator<Item = ImplicationProofItem>,
    ) -> Self {
        let mut justification = vec![head.as_proof_item()];
        justification.extend(rest);
        Self {
            outcome,
            justification,
        }
    }

    /// Renders the decider names in the trace.
    pub fn trace(&self) -> DecisionTrace<'_> {
        DecisionTrace(&self.justification)
    }
}

/// Display adapter over a justification, e.g. `and > left > right`.
pub struct DecisionTrace<'a>(&'a [ImplicationProofItem]);

impl DecisionTrace<'_> {
    /// Decider names in trace order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .map(|item| item.implication.decider.name())
            .collect()
    }
}

impl fmt::Display for DecisionTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" > "))
    }
}

/// The "not yet decidable" outcome.
///
/// Not a failure: callers defer judgment and retry once more on-chain
/// information is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CannotDecide {
    /// Decider that gave up.
    pub decider: &'static str,
    pub reason: String,
}

impl CannotDecide {
    pub fn new(decider: &'static str, reason: impl Into<String>) -> Self {
        Self {
            decider,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CannotDecide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot decide: {}", self.decider, self.reason)
    }
}

/// Three-valued result of evaluating a property.
#[derive(Clone, Debug)]
pub enum Verdict {
    Decided(Decision),
    Undecided(CannotDecide),
}

impl Verdict {
    /// The boolean outcome, if decided.
    pub fn outcome(&self) -> Option<bool> {
        match self {
            Self::Decided(decision) => Some(decision.outcome),
            Self::Undecided(_) => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Decided(_))
    }

    /// Converts to the `Result` form for `?`-style callers.
    pub fn into_decision(self) -> Result<Decision, CannotDecide> {
        match self {
            Self::Decided(decision) => Ok(decision),
            Self::Undecided(reason) => Err(reason),
        }
    }
}

// =============================================================================
// CLUSTER C: QUANTIFICATION
// =============================================================================

/// Parameters handed to a quantifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuantifierParameters {
    /// All integers in `[start, end)`.
    IntegerRange { start: U256, end: U256 },
    /// All integers in `[0, bound)`.
    LessThan(U256),
    /// Quantifier-specific encoding.
    Custom(Vec<u8>),
}

/// A single value produced by a quantifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuantifiedValue {
    Integer(U256),
    Bytes(Vec<u8>),
}

/// Everything a quantifier could enumerate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantifierResult {
    pub results: Vec<QuantifiedValue>,
    /// `false` when the enumeration is known to be partial.
    pub all_results_quantified: bool,
}

impl QuantifierResult {
    /// A complete enumeration.
    pub fn complete(results: Vec<QuantifiedValue>) -> Self {
        Self {
            results,
            all_results_quantified: true,
        }
    }

    /// A partial enumeration.
    pub fn partial(results: Vec<QuantifiedValue>) -> Self {
        Self {
            results,
            all_results_quantified: false,
        }
    }
}
