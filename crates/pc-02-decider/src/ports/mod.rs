//! # Ports
//!
//! The two seams of the engine: deciders evaluate properties, quantifiers
//! enumerate the values a quantified property ranges over.

use async_trait::async_trait;

use crate::domain::{DeciderError, Property, QuantifierParameters, QuantifierResult, Verdict};

/// Evaluates a property to a tri-state verdict.
///
/// `property` is the property being decided; its `decider` is `self`. Deciders
/// put it first in their justification so the trace can be replayed.
#[async_trait]
pub trait Decider: Send + Sync {
    /// Stable name used in traces and logs.
    fn name(&self) -> &'static str;

    /// Decide `property`.
    async fn decide(&self, property: &Property) -> Result<Verdict, DeciderError>;
}

/// Source of "all values matching some criteria".
#[async_trait]
pub trait Quantifier: Send + Sync {
    /// Stable name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Enumerate matching values; the result says whether it is complete.
    async fn get_all_quantified(
        &self,
        parameters: &QuantifierParameters,
    ) -> Result<QuantifierResult, DeciderError>;
}
