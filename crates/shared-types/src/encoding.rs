//! # Canonical ABI Encoding
//!
//! Fixed-layout, 32-byte-word encoding compatible with Solidity's
//! `abi.encode` for the static tuples used on chain. These bytes feed the
//! merkle leaf hash and every on-chain payload, so exactly one byte string is
//! accepted per value: decoders reject dirty padding, unexpected offsets and
//! trailing data.
//!
//! ## Layouts
//!
//! | Type | Tuple |
//! |------|-------|
//! | `Range` | `(uint256 start, uint256 end)` |
//! | `StateObject` | `(address predicate, bytes data)` |
//! | `StateUpdate` | `(uint256 start, uint256 end, bytes stateObject, address deposit, uint256 block)` |
//! | `Transaction` | `(address deposit, uint256 start, uint256 end, bytes body)` |
//! | `BlockTransaction` | `(uint256 block, bytes transaction, bytes stateUpdate)` |

use crate::entities::{
    Address, BlockTransaction, Range, StateObject, StateUpdate, Transaction, U256,
};
use crate::errors::CodecError;

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// Types with a single canonical byte representation.
pub trait CanonicalEncoding: Sized {
    /// Encode to canonical bytes.
    fn encode(&self) -> Vec<u8>;

    /// Decode canonical bytes, rejecting any other representation.
    fn decode(data: &[u8]) -> Result<Self, CodecError>;
}

/// Parameter kinds supported by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Uint,
    Address,
    Bytes,
}

/// A single ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Address(Address),
    Bytes(Vec<u8>),
}

// =============================================================================
// LOW-LEVEL TUPLE CODEC
// =============================================================================

/// Encode a tuple of tokens: static head words, then dynamic tails in order.
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::Address(address) => head.extend_from_slice(&address_word(address)),
            Token::Bytes(bytes) => {
                head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padding_for(bytes.len()), 0);
            }
        }
    }

    head.extend(tail);
    head
}

/// Decode a tuple of the given kinds, enforcing canonical layout.
pub fn decode_tokens(data: &[u8], kinds: &[ParamKind]) -> Result<Vec<Token>, CodecError> {
    let head_len = kinds.len() * WORD;
    let mut tokens = Vec::with_capacity(kinds.len());
    // Where the next dynamic tail must begin
    let mut cursor = head_len;

    for (i, kind) in kinds.iter().enumerate() {
        let word = read_word(data, i * WORD)?;
        match kind {
            ParamKind::Uint => tokens.push(Token::Uint(U256::from_big_endian(word))),
            ParamKind::Address => {
                if word[..WORD - 20].iter().any(|b| *b != 0) {
                    return Err(CodecError::NonCanonical {
                        reason: "address padding is not zero",
                    });
                }
                let mut address = [0u8; 20];
                address.copy_from_slice(&word[WORD - 20..]);
                tokens.push(Token::Address(address));
            }
            ParamKind::Bytes => {
                let offset = word_to_usize(word, "bytes offset")?;
                if offset != cursor {
                    return Err(CodecError::NonCanonical {
                        reason: "bytes offset does not point at the next tail",
                    });
                }
                let len = word_to_usize(read_word(data, offset)?, "bytes length")?;
                let start = offset + WORD;
                let end = len
                    .checked_add(padding_for(len))
                    .and_then(|padded| start.checked_add(padded))
                    .ok_or(CodecError::Overflow {
                        field: "bytes length",
                    })?;
                let slice = data.get(start..end).ok_or(CodecError::Truncated {
                    offset: start,
                    needed: end - start,
                    available: data.len().saturating_sub(start),
                })?;
                if slice[len..].iter().any(|b| *b != 0) {
                    return Err(CodecError::NonCanonical {
                        reason: "bytes padding is not zero",
                    });
                }
                tokens.push(Token::Bytes(slice[..len].to_vec()));
                cursor = end;
            }
        }
    }

    if data.len() != cursor {
        return Err(CodecError::TrailingBytes {
            expected: cursor,
            actual: data.len(),
        });
    }

    Ok(tokens)
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], CodecError> {
    data.get(offset..offset + WORD)
        .ok_or(CodecError::Truncated {
            offset,
            needed: WORD,
            available: data.len().saturating_sub(offset),
        })
}

fn word_to_usize(word: &[u8], field: &'static str) -> Result<usize, CodecError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX) {
        return Err(CodecError::Overflow { field });
    }
    Ok(value.as_usize())
}

fn padding_for(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

/// Big-endian 32-byte word for an unsigned integer.
pub fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Left-padded 32-byte word for an address.
pub fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 20..].copy_from_slice(address);
    word
}

fn to_u64(value: U256, field: &'static str) -> Result<u64, CodecError> {
    if value > U256::from(u64::MAX) {
        return Err(CodecError::Overflow { field });
    }
    Ok(value.as_u64())
}

/// Typed, in-order access to decoded tokens.
struct TokenReader(std::vec::IntoIter<Token>);

impl TokenReader {
    fn decode(data: &[u8], kinds: &[ParamKind]) -> Result<Self, CodecError> {
        Ok(Self(decode_tokens(data, kinds)?.into_iter()))
    }

    fn uint(&mut self) -> Result<U256, CodecError> {
        match self.0.next() {
            Some(Token::Uint(value)) => Ok(value),
            _ => Err(CodecError::NonCanonical {
                reason: "expected uint256",
            }),
        }
    }

    fn address(&mut self) -> Result<Address, CodecError> {
        match self.0.next() {
            Some(Token::Address(address)) => Ok(address),
            _ => Err(CodecError::NonCanonical {
                reason: "expected address",
            }),
        }
    }

    fn bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        match self.0.next() {
            Some(Token::Bytes(bytes)) => Ok(bytes),
            _ => Err(CodecError::NonCanonical {
                reason: "expected bytes",
            }),
        }
    }
}

// =============================================================================
// DOMAIN TYPES
// =============================================================================

impl CanonicalEncoding for Range {
    fn encode(&self) -> Vec<u8> {
        encode_tokens(&[Token::Uint(self.start), Token::Uint(self.end)])
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::decode(data, &[ParamKind::Uint, ParamKind::Uint])?;
        Ok(Range::new(reader.uint()?, reader.uint()?)?)
    }
}

impl CanonicalEncoding for StateObject {
    fn encode(&self) -> Vec<u8> {
        encode_tokens(&[
            Token::Address(self.predicate_address),
            Token::Bytes(self.data.clone()),
        ])
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::decode(data, &[ParamKind::Address, ParamKind::Bytes])?;
        Ok(StateObject {
            predicate_address: reader.address()?,
            data: reader.bytes()?,
        })
    }
}

impl CanonicalEncoding for StateUpdate {
    fn encode(&self) -> Vec<u8> {
        encode_tokens(&[
            Token::Uint(self.range.start),
            Token::Uint(self.range.end),
            Token::Bytes(self.state_object.encode()),
            Token::Address(self.deposit_address),
            Token::Uint(U256::from(self.plasma_block_number)),
        ])
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::decode(
            data,
            &[
                ParamKind::Uint,
                ParamKind::Uint,
                ParamKind::Bytes,
                ParamKind::Address,
                ParamKind::Uint,
            ],
        )?;
        let range = Range::new(reader.uint()?, reader.uint()?)?;
        let state_object = StateObject::decode(&reader.bytes()?)?;
        let deposit_address = reader.address()?;
        let plasma_block_number = to_u64(reader.uint()?, "plasma_block_number")?;
        Ok(StateUpdate {
            range,
            state_object,
            deposit_address,
            plasma_block_number,
        })
    }
}

impl CanonicalEncoding for Transaction {
    fn encode(&self) -> Vec<u8> {
        encode_tokens(&[
            Token::Address(self.deposit_address),
            Token::Uint(self.range.start),
            Token::Uint(self.range.end),
            Token::Bytes(self.body.clone()),
        ])
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::decode(
            data,
            &[
                ParamKind::Address,
                ParamKind::Uint,
                ParamKind::Uint,
                ParamKind::Bytes,
            ],
        )?;
        let deposit_address = reader.address()?;
        let range = Range::new(reader.uint()?, reader.uint()?)?;
        Ok(Transaction {
            deposit_address,
            range,
            body: reader.bytes()?,
        })
    }
}

impl CanonicalEncoding for BlockTransaction {
    fn encode(&self) -> Vec<u8> {
        encode_tokens(&[
            Token::Uint(U256::from(self.block_number)),
            Token::Bytes(self.transaction.encode()),
            Token::Bytes(self.state_update.encode()),
        ])
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = TokenReader::decode(
            data,
            &[ParamKind::Uint, ParamKind::Bytes, ParamKind::Bytes],
        )?;
        let block_number = to_u64(reader.uint()?, "block_number")?;
        let transaction = Transaction::decode(&reader.bytes()?)?;
        let state_update = StateUpdate::decode(&reader.bytes()?)?;
        Ok(BlockTransaction {
            block_number,
            transaction,
            state_update,
        })
    }
}
