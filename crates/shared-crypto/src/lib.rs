//! # Shared Crypto - Plasma Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Merkle nodes, digests, addresses |
//! | `ecdsa` | secp256k1 | Commitment signing, address derivation |
//! | `signer` | - | `SignatureProvider` port + local implementation |
//!
//! ## Security Properties
//!
//! - **Keccak-256**: matches the EVM `keccak256` opcode
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod signer;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many, KeccakHasher};
pub use signer::{Secp256k1SignatureProvider, SignatureProvider};
