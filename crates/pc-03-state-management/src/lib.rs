//! # pc-03-state-management
//!
//! State Management subsystem for the plasma chain.
//!
//! ## Role in System
//!
//! - **Transaction execution**: resolves a `Transaction` into the
//!   `StateUpdate` it produces, by delegating to the predicate plugin that
//!   owns the transaction's range
//! - **Reconciliation**: checks the transaction against every verified range
//!   it touches and reports which slices were actually backed
//!
//! ## Flow
//!
//! ```text
//! [Aggregator (5)] ──execute_transaction──→ [StateManager]
//!                                              │
//!                        ┌─────────────────────┴───────────────┐
//!                        ↓                                     ↓
//!          StateDb::get_verified_state_updates   PluginManager::get_plugin
//!                                                              │
//!                                           execute_state_transition (per overlap)
//! ```
//!
//! ## Guarantees
//!
//! - Every returned entry shares one predicate
//! - Every overlap yields an identical resulting update
//! - The resulting update belongs to the caller's block
//! - Failures have no side effects

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::StateManager;
