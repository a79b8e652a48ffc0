//! # Domain Layer
//!
//! Property and verdict types. Evaluation lives in `deciders`.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::DeciderError;
