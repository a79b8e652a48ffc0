//! # Decider Engine (pc-02)
//!
//! Evaluates nested boolean properties used to settle plasma disputes. Every
//! evaluation ends in one of three verdicts: decided true, decided false, or
//! cannot decide yet (some input, typically on-chain state, is not final).
//! The third outcome is a `Verdict::Undecided`, kept apart from `DeciderError`
//! so it can never be mistaken for a failure or for `false`.
//!
//! ## Module Structure
//!
//! ```text
//! pc-02-decider/
//! ├── domain/      # Property, Decision, Verdict, errors
//! ├── ports/       # Decider, Quantifier
//! ├── deciders/    # and, not, for all, there exists
//! └── adapters/    # integer quantifiers, constant decider
//! ```
//!
//! ## Justifications
//!
//! Each decision carries the ordered list of properties consulted, starting
//! with the property being decided. The list is what a challenger replays
//! on-chain.

pub mod adapters;
pub mod deciders;
pub mod domain;
pub mod ports;

pub use adapters::{
    ConstantDecider, IntegerRangeQuantifier, NonnegativeIntegerLessThanQuantifier,
    StaticQuantifier, DEFAULT_MAX_ENUMERATION,
};
pub use deciders::{AndDecider, ForAllSuchThatDecider, NotDecider, ThereExistsSuchThatDecider};
pub use domain::{
    CannotDecide, Decision, DecisionTrace, DeciderError, DeciderInput, ImplicationProofItem,
    Property, PropertyFactory, QuantifiedInput, QuantifiedValue, QuantifierParameters,
    QuantifierResult, Verdict,
};
pub use ports::{Decider, Quantifier};
