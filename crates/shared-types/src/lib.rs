//! # Shared Types Crate
//!
//! Domain entities and the canonical wire encoding shared by every plasma
//! subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-subsystem types are defined here.
//! - **One Encoding**: `CanonicalEncoding` is the only byte layout used for
//!   merkle leaves, signatures and on-chain payloads.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::CanonicalEncoding;
pub use entities::*;
pub use errors::*;
