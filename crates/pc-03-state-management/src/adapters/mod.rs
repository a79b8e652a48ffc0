pub mod memory_db;
pub mod ownership;
pub mod registry;

pub use memory_db::InMemoryStateDb;
pub use ownership::{OwnershipPredicate, OWNERSHIP_WITNESS_LEN};
pub use registry::PredicateRegistry;
