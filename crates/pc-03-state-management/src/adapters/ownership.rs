//! Ownership predicate.
//!
//! A range is owned by an address stored in `state_object.data`. The owner
//! moves it by signing the transaction; the body names the new owner and the
//! block the new state update belongs to.
//!
//! ```text
//! body    = abi.encode(address newOwner, uint256 plasmaBlockNumber)
//! witness = signature(64) || compressed public key(33)
//! ```

use async_trait::async_trait;
use shared_crypto::{CryptoError, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
use shared_types::encoding::{decode_tokens, encode_tokens, ParamKind, Token};
use shared_types::{Address, CanonicalEncoding, StateObject, StateUpdate, Transaction, U256};

use crate::domain::StateManagerError;
use crate::ports::PredicatePlugin;

const SIGNATURE_LEN: usize = 64;
const PUBLIC_KEY_LEN: usize = 33;

/// Witness length: signature followed by the signer's compressed key.
pub const OWNERSHIP_WITNESS_LEN: usize = SIGNATURE_LEN + PUBLIC_KEY_LEN;

/// Signature-gated transfer of range ownership.
#[derive(Debug, Clone)]
pub struct OwnershipPredicate {
    address: Address,
}

impl OwnershipPredicate {
    /// Plugin for the predicate deployed at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// State object assigning a range to `owner` under this predicate.
    pub fn state_object(&self, owner: Address) -> StateObject {
        StateObject::new(self.address, owner.to_vec())
    }

    /// Transaction body transferring to `new_owner` at `plasma_block_number`.
    pub fn transaction_body(new_owner: Address, plasma_block_number: u64) -> Vec<u8> {
        encode_tokens(&[
            Token::Address(new_owner),
            Token::Uint(U256::from(plasma_block_number)),
        ])
    }

    /// Witness authorizing `transaction`, signed by the current owner.
    pub fn sign(keypair: &Secp256k1KeyPair, transaction: &Transaction) -> Result<Vec<u8>, CryptoError> {
        let signature = keypair.sign(&transaction.encode())?;
        let mut witness = Vec::with_capacity(OWNERSHIP_WITNESS_LEN);
        witness.extend_from_slice(signature.as_bytes());
        witness.extend_from_slice(keypair.public_key().as_bytes());
        Ok(witness)
    }

    fn reject(&self, reason: impl Into<String>) -> StateManagerError {
        StateManagerError::Plugin {
            address: self.address,
            reason: reason.into(),
        }
    }

    fn parse_body(&self, body: &[u8]) -> Result<(Address, u64), StateManagerError> {
        let tokens = decode_tokens(body, &[ParamKind::Address, ParamKind::Uint])
            .map_err(|e| self.reject(format!("malformed body: {e}")))?;
        match tokens.as_slice() {
            [Token::Address(owner), Token::Uint(block)] => {
                if block.bits() > 64 {
                    return Err(self.reject("block number overflows u64"));
                }
                Ok((*owner, block.low_u64()))
            }
            _ => Err(self.reject("malformed body")),
        }
    }

    fn verify_witness(
        &self,
        owner: &Address,
        transaction: &Transaction,
        witness: &[u8],
    ) -> Result<(), StateManagerError> {
        if witness.len() != OWNERSHIP_WITNESS_LEN {
            return Err(self.reject(format!(
                "witness must be {OWNERSHIP_WITNESS_LEN} bytes, got {}",
                witness.len()
            )));
        }
        let (signature, public_key) = witness.split_at(SIGNATURE_LEN);

        let mut signature_bytes = [0u8; SIGNATURE_LEN];
        signature_bytes.copy_from_slice(signature);
        let mut key_bytes = [0u8; PUBLIC_KEY_LEN];
        key_bytes.copy_from_slice(public_key);

        let public_key = Secp256k1PublicKey::from_bytes(key_bytes)
            .map_err(|e| self.reject(e.to_string()))?;
        let signer = public_key
            .to_address()
            .map_err(|e| self.reject(e.to_string()))?;
        if signer != *owner {
            return Err(self.reject("witness is not signed by the current owner"));
        }
        public_key
            .verify(
                &transaction.encode(),
                &Secp256k1Signature::from_bytes(signature_bytes),
            )
            .map_err(|e| self.reject(e.to_string()))
    }
}

#[async_trait]
impl PredicatePlugin for OwnershipPredicate {
    async fn execute_state_transition(
        &self,
        previous: &StateUpdate,
        transaction: &Transaction,
        witness: &[u8],
    ) -> Result<StateUpdate, StateManagerError> {
        let owner: Address = previous
            .state_object
            .data
            .as_slice()
            .try_into()
            .map_err(|_| self.reject("previous state does not name an owner"))?;

        self.verify_witness(&owner, transaction, witness)?;
        let (new_owner, plasma_block_number) = self.parse_body(&transaction.body)?;

        Ok(StateUpdate {
            range: transaction.range,
            state_object: self.state_object(new_owner),
            deposit_address: transaction.deposit_address,
            plasma_block_number,
        })
    }
}
