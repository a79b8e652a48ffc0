//! # Plasma-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Fully wired in-memory operator
//! └── integration/      # Cross-subsystem flows
//!     ├── aggregator_flow.rs
//!     └── dispute_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pc-tests
//! cargo test -p pc-tests integration::dispute_flow
//! cargo bench -p pc-tests
//! ```

pub mod harness;
pub mod integration;
