//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
///
/// Node error payloads are sorted into these variants once, where the RPC
/// response is received. Callers match on the variant, never on the text.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node already holds a transaction with this nonce.
    #[error("Nonce too low: {0}")]
    NonceTooLow(String),

    /// The faucet account cannot cover value plus gas.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// A value transfer ready to be signed. Built fresh for every claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    pub chain_id: u64,
    pub sender: Address,
    pub recipient: Address,
    pub amount: U256,
    /// Legacy gas price in wei.
    pub gas_price: u128,
    pub gas_limit: u64,
    pub nonce: u64,
}

/// Transaction counts of one account, read from the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceCounts {
    /// Count including the node's pending pool.
    pub pending: u64,
    /// Count as of the latest block.
    pub latest: u64,
}

impl NonceCounts {
    /// The node holds a transaction from this account that is not yet mined.
    pub fn has_unconfirmed(&self) -> bool {
        self.pending > self.latest
    }
}

/// A signed, EIP-2718 encoded transaction.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub hash: TxHash,
    pub raw: Bytes,
}

/// A transaction that was broadcast and reached the requested depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub hash: TxHash,
    pub block_number: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(10143u64);
        assert_eq!(chain_id.0, 10143);
        assert_eq!(u64::from(chain_id), 10143);
    }

    #[test]
    fn test_nonce_counts_unconfirmed() {
        assert!(NonceCounts { pending: 5, latest: 4 }.has_unconfirmed());
        assert!(!NonceCounts { pending: 4, latest: 4 }.has_unconfirmed());
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ChainError::ConfirmationTimeout(100);
        assert!(err.to_string().contains("100 blocks"));

        let err = ChainError::ChainMismatch {
            expected: 10143,
            actual: 1,
        };
        assert!(err.to_string().contains("10143"));
    }
}
