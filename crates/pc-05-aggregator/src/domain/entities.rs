use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockTransaction};

/// An accepted transaction, signed by the aggregator.
///
/// `signature` is over `block_transaction.encode()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransactionCommitment {
    pub block_transaction: BlockTransaction,
    pub signature: Vec<u8>,
    pub signer: Address,
}
