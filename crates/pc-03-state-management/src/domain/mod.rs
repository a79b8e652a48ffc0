pub mod entities;
pub mod errors;
pub mod reconcile;

pub use entities::*;
pub use errors::*;
