//! # Block Production Subsystem (pc-04)
//!
//! Collects the state updates of the block being built and commits them to
//! L1 as a merkle interval tree root.
//!
//! ## Architecture
//!
//! ```text
//! Aggregator ──add_pending_state_update──► BlockManager ──► BlockDb ──► KeyValueStore
//!                                              │
//!                                              └──submit_block(root)──► CommitmentContract
//! ```
//!
//! ## Guarantees
//!
//! | Operation | On failure |
//! |-----------|------------|
//! | `submit_next_block`, contract rejects | pending set and block number unchanged |
//! | `finalize_next_block` | clear-and-increment or neither |
//! | `submit_next_block`, nothing pending | no-op, no contract call |

pub mod adapters;
pub mod block_db;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use block_db::{BlockDb, GENESIS_BLOCK_NUMBER};
pub use config::BlockProductionConfig;
pub use domain::{block_tree, state_update_leaf, BlockInclusionProof, KeyPrefix, SubmittedBlock};
pub use error::{BlockProductionError, CommitmentError, KVStoreError, Result};
pub use ports::{BatchOperation, BlockProductionApi, CommitmentContract, KeyValueStore};
pub use service::BlockManager;
