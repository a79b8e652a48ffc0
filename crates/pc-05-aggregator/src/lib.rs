//! # Aggregator (pc-05)
//!
//! Entry point for client transactions.
//!
//! ```text
//! Transaction + witness
//!        │
//!        ▼
//! [Aggregator] ──execute_transaction──► [StateManager (pc-03)]
//!        │
//!        ├── coverage check
//!        ├── sign BlockTransaction ──► SignatureProvider
//!        └── add_pending_state_update ──► [BlockManager (pc-04)]
//! ```
//!
//! A transaction either yields a signed `BlockTransactionCommitment` and one
//! pending state update, or an error and no pending change.

pub mod config;
pub mod domain;
pub mod error;
pub mod service;

pub use config::AggregatorConfig;
pub use domain::{check_coverage, BlockTransactionCommitment};
pub use error::{AggregatorError, Result};
pub use service::Aggregator;
