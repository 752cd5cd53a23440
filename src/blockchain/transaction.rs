//! Transfer intent construction.
//!
//! # Responsibilities
//! - Estimate the gas limit for a plain value transfer
//! - Pin the gas price and nonce chosen by the caller
//! - Hand back a `TransactionIntent` for the wallet to sign

use alloy::primitives::{Address, U256};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainResult, TransactionIntent};
use crate::blockchain::wallet::Wallet;

/// One gwei in wei.
pub const GWEI: u128 = 1_000_000_000;

/// Convert a gwei amount to wei.
pub fn gwei_to_wei(gwei: u64) -> u128 {
    gwei as u128 * GWEI
}

/// Builds transfer intents from the faucet wallet.
pub struct TxBuilder<'a> {
    client: &'a dyn ChainClient,
    wallet: &'a Wallet,
}

impl<'a> TxBuilder<'a> {
    /// Create a new transaction builder.
    pub fn new(client: &'a dyn ChainClient, wallet: &'a Wallet) -> Self {
        Self { client, wallet }
    }

    /// Build a native transfer with an estimated gas limit.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `value` - Amount of native token to send, in wei
    /// * `gas_price` - Legacy gas price, in wei
    /// * `nonce` - Nonce to use; the caller decides which count it trusts
    pub async fn transfer(
        &self,
        to: Address,
        value: U256,
        gas_price: u128,
        nonce: u64,
    ) -> ChainResult<TransactionIntent> {
        let sender = self.wallet.address();
        let gas_limit = self.client.estimate_transfer_gas(sender, to, value).await?;

        tracing::debug!(
            to = %to,
            gas_limit = gas_limit,
            nonce = nonce,
            "Transfer intent built"
        );

        Ok(TransactionIntent {
            chain_id: self.wallet.chain_id(),
            sender,
            recipient: to,
            amount: value,
            gas_price,
            gas_limit,
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gwei_to_wei() {
        assert_eq!(gwei_to_wei(70), 70_000_000_000);
        assert_eq!(gwei_to_wei(0), 0);
    }
}
