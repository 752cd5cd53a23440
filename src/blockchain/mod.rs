//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment (FAUCET_PRIVATE_KEY) + [blockchain] config
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (gas estimation, intent construction)
//!     → wallet.rs signs → client.rs broadcasts and waits for confirmations
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{BlockchainClient, ChainClient};
pub use types::{
    BlockchainConfig, ChainError, ChainId, ChainResult, NonceCounts, SignedTransaction, SubmittedTransaction,
    TransactionIntent,
};
pub use wallet::Wallet;
