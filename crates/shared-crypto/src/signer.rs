//! # Signature Provider
//!
//! The port an aggregator uses to witness accepted commitments, plus the
//! local secp256k1 implementation. Remote signers (HSMs, wallets) implement
//! the same trait.

use crate::ecdsa::Secp256k1KeyPair;
use crate::CryptoError;
use async_trait::async_trait;
use shared_types::Address;

/// Signs payloads on behalf of one address.
#[async_trait]
pub trait SignatureProvider: Send + Sync {
    /// Address whose key produces the signatures.
    async fn address(&self) -> Result<Address, CryptoError>;

    /// Sign a payload, returning the raw signature bytes.
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// In-process signer backed by a secp256k1 keypair.
pub struct Secp256k1SignatureProvider {
    keypair: Secp256k1KeyPair,
    address: Address,
}

impl Secp256k1SignatureProvider {
    /// Wrap an existing keypair.
    pub fn new(keypair: Secp256k1KeyPair) -> Result<Self, CryptoError> {
        let address = keypair.public_key().to_address()?;
        Ok(Self { keypair, address })
    }

    /// Signer with a freshly generated key.
    pub fn random() -> Result<Self, CryptoError> {
        Self::new(Secp256k1KeyPair::generate())
    }

    /// The keypair's public key, for verifiers.
    pub fn public_key(&self) -> crate::Secp256k1PublicKey {
        self.keypair.public_key()
    }
}

#[async_trait]
impl SignatureProvider for Secp256k1SignatureProvider {
    async fn address(&self) -> Result<Address, CryptoError> {
        Ok(self.address)
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.keypair.sign(message)?.as_bytes().to_vec())
    }
}
