//! # Domain Layer
//!
//! Pure merkle interval tree logic. No I/O.

pub mod entities;
pub mod errors;
pub mod tree;

pub use entities::*;
pub use errors::*;
pub use tree::*;
