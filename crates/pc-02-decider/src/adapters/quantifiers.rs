//! Built-in integer quantifiers.
//!
//! Both enumerate completely, up to a configured maximum size.

use async_trait::async_trait;
use shared_types::U256;

use crate::domain::{DeciderError, QuantifiedValue, QuantifierParameters, QuantifierResult};
use crate::ports::Quantifier;

/// Default cap on the number of values a built-in quantifier will produce.
pub const DEFAULT_MAX_ENUMERATION: u64 = 4096;

fn enumerate(
    quantifier: &'static str,
    start: U256,
    end: U256,
    max: u64,
) -> Result<QuantifierResult, DeciderError> {
    if start > end {
        return Err(DeciderError::InvalidParameters {
            quantifier,
            reason: format!("start {start} is greater than end {end}"),
        });
    }
    let count = end - start;
    if count > U256::from(max) {
        return Err(DeciderError::EnumerationTooLarge {
            quantifier,
            requested: count,
            max,
        });
    }
    let results = (0..count.low_u64())
        .map(|offset| QuantifiedValue::Integer(start + offset))
        .collect();
    Ok(QuantifierResult::complete(results))
}

/// Every integer in `[start, end)`.
#[derive(Debug, Clone)]
pub struct IntegerRangeQuantifier {
    max_enumeration: u64,
}

impl IntegerRangeQuantifier {
    pub fn new() -> Self {
        Self::with_max(DEFAULT_MAX_ENUMERATION)
    }

    pub fn with_max(max_enumeration: u64) -> Self {
        Self { max_enumeration }
    }
}

impl Default for IntegerRangeQuantifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Quantifier for IntegerRangeQuantifier {
    fn name(&self) -> &'static str {
        "integer_range"
    }

    async fn get_all_quantified(
        &self,
        parameters: &QuantifierParameters,
    ) -> Result<QuantifierResult, DeciderError> {
        match parameters {
            QuantifierParameters::IntegerRange { start, end } => {
                enumerate(self.name(), *start, *end, self.max_enumeration)
            }
            _ => Err(DeciderError::InvalidParameters {
                quantifier: self.name(),
                reason: "expected an integer range".into(),
            }),
        }
    }
}

/// Every integer in `[0, bound)`.
#[derive(Debug, Clone)]
pub struct NonnegativeIntegerLessThanQuantifier {
    max_enumeration: u64,
}

impl NonnegativeIntegerLessThanQuantifier {
    pub fn new() -> Self {
        Self::with_max(DEFAULT_MAX_ENUMERATION)
    }

    pub fn with_max(max_enumeration: u64) -> Self {
        Self { max_enumeration }
    }
}

impl Default for NonnegativeIntegerLessThanQuantifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Quantifier for NonnegativeIntegerLessThanQuantifier {
    fn name(&self) -> &'static str {
        "nonnegative_integer_less_than"
    }

    async fn get_all_quantified(
        &self,
        parameters: &QuantifierParameters,
    ) -> Result<QuantifierResult, DeciderError> {
        match parameters {
            QuantifierParameters::LessThan(bound) => {
                enumerate(self.name(), U256::zero(), *bound, self.max_enumeration)
            }
            _ => Err(DeciderError::InvalidParameters {
                quantifier: self.name(),
                reason: "expected an upper bound".into(),
            }),
        }
    }
}

/// Returns a fixed enumeration. Useful for wiring external indexes in tests.
#[derive(Debug, Clone)]
pub struct StaticQuantifier {
    result: QuantifierResult,
}

impl StaticQuantifier {
    pub fn new(results: Vec<QuantifiedValue>, all_results_quantified: bool) -> Self {
        Self {
            result: QuantifierResult {
                results,
                all_results_quantified,
            },
        }
    }
}

#[async_trait]
impl Quantifier for StaticQuantifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn get_all_quantified(
        &self,
        _parameters: &QuantifierParameters,
    ) -> Result<QuantifierResult, DeciderError> {
        Ok(self.result.clone())
    }
}
