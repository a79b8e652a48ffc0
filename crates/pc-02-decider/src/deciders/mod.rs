//! # Deciders
//!
//! Logical connectives and quantifiers over `Property` trees. Sub-properties
//! are awaited one at a time, in input order.

pub mod and;
pub mod not;
pub mod quantified;

pub use and::AndDecider;
pub use not::NotDecider;
pub use quantified::{ForAllSuchThatDecider, ThereExistsSuchThatDecider};
