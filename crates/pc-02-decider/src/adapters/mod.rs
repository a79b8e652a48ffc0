//! # Adapters
//!
//! Concrete quantifiers and a constant decider.

pub mod constant;
pub mod quantifiers;

pub use constant::ConstantDecider;
pub use quantifiers::{
    IntegerRangeQuantifier, NonnegativeIntegerLessThanQuantifier, StaticQuantifier,
    DEFAULT_MAX_ENUMERATION,
};
