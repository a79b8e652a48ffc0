pub mod commitment;
pub mod memory_kv;

pub use commitment::InMemoryCommitmentContract;
pub use memory_kv::InMemoryKVStore;
