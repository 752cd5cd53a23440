//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint (primary + failovers)
//! - Query faucet account state (nonces, balance) and estimate gas
//! - Broadcast signed transactions and wait for confirmations
//! - Sort node errors into the `ChainError` taxonomy

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{PendingTransactionError, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{TransportError, TransportResult};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainConfig, ChainError, ChainId, ChainResult, NonceCounts, SignedTransaction,
    SubmittedTransaction,
};
use crate::observability::metrics;

/// Remote operations the claim flow needs from the chain.
///
/// Every method is a network round trip and may fail; implementations return
/// the structured `ChainError` so callers can match on variants.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Transaction count including the node's pending pool.
    async fn pending_transaction_count(&self, address: Address) -> ChainResult<u64>;

    /// Transaction count as of the latest block.
    async fn latest_transaction_count(&self, address: Address) -> ChainResult<u64>;

    /// Pending and latest counts from a single node.
    async fn transaction_counts(&self, address: Address) -> ChainResult<NonceCounts> {
        Ok(NonceCounts {
            pending: self.pending_transaction_count(address).await?,
            latest: self.latest_transaction_count(address).await?,
        })
    }

    /// Gas limit for a plain value transfer.
    async fn estimate_transfer_gas(&self, from: Address, to: Address, value: U256) -> ChainResult<u64>;

    /// Broadcast a signed transaction and wait until it is `confirmations` deep.
    async fn submit(
        &self,
        tx: &SignedTransaction,
        confirmations: u64,
    ) -> ChainResult<SubmittedTransaction>;

    /// Native balance of an address.
    async fn balance(&self, address: Address) -> ChainResult<U256>;

    /// Latest block number.
    async fn block_number(&self) -> ChainResult<u64>;
}

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Fails only if the primary URL does not parse. An unreachable node or a
    /// chain id mismatch is logged and tolerated so the bot can still answer
    /// membership checks while the RPC recovers.
    pub async fn new(config: BlockchainConfig) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url)) as Arc<dyn Provider + Send + Sync>);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    #[cfg(test)]
    fn with_providers(providers: Vec<Arc<dyn Provider + Send + Sync>>, config: BlockchainConfig) -> Self {
        Self {
            providers,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        self.with_failover("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Check if the blockchain is reachable.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.block_number().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Run a read call against each provider in order.
    ///
    /// Transport failures and timeouts move on to the next provider. A node
    /// error response is an answer about the request itself, so it is
    /// returned immediately.
    async fn with_failover<T, F, Fut>(&self, method: &'static str, call: F) -> ChainResult<T>
    where
        F: Fn(Arc<dyn Provider + Send + Sync>) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) if e.as_error_resp().is_some() => return Err(classify_transport_error(e)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, method, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, method, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc(format!("All RPC providers failed for {}", method)))
    }
}

#[async_trait]
impl ChainClient for BlockchainClient {
    async fn pending_transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.with_failover("eth_getTransactionCount", |p| async move {
            p.get_transaction_count(address).pending().await
        })
        .await
    }

    async fn latest_transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.with_failover("eth_getTransactionCount", |p| async move {
            p.get_transaction_count(address).latest().await
        })
        .await
    }

    async fn transaction_counts(&self, address: Address) -> ChainResult<NonceCounts> {
        // Both counts must come from the same node.
        self.with_failover("eth_getTransactionCount", |p| async move {
            let pending = p.get_transaction_count(address).pending().await?;
            let latest = p.get_transaction_count(address).latest().await?;
            Ok::<_, TransportError>(NonceCounts { pending, latest })
        })
        .await
    }

    async fn estimate_transfer_gas(&self, from: Address, to: Address, value: U256) -> ChainResult<u64> {
        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value);

        self.with_failover("eth_estimateGas", |p| {
            let request = request.clone();
            async move { p.estimate_gas(request).await }
        })
        .await
    }

    async fn submit(
        &self,
        tx: &SignedTransaction,
        confirmations: u64,
    ) -> ChainResult<SubmittedTransaction> {
        // Broadcast goes to the primary only; failover endpoints may be
        // read replicas.
        let provider = &self.providers[0];

        let pending = match timeout(self.timeout_duration, provider.send_raw_transaction(&tx.raw)).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(classify_transport_error(e)),
            Err(_) => return Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        };

        tracing::info!(
            tx_hash = %tx.hash,
            confirmations = confirmations,
            "Transaction broadcast, waiting for confirmations"
        );

        let receipt = pending
            .with_required_confirmations(confirmations.max(1))
            .with_timeout(Some(Duration::from_secs(self.config.confirmation_timeout_secs)))
            .get_receipt()
            .await
            .map_err(|e| match e {
                PendingTransactionError::TransportError(e) => classify_transport_error(e),
                PendingTransactionError::TxWatcher(_) => ChainError::ConfirmationTimeout(confirmations),
                other => ChainError::Rpc(other.to_string()),
            })?;

        if !receipt.status() {
            return Err(ChainError::Reverted(tx.hash.to_string()));
        }

        Ok(SubmittedTransaction {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.with_failover("eth_getBalance", |p| async move { p.get_balance(address).await })
            .await
    }

    async fn block_number(&self) -> ChainResult<u64> {
        self.with_failover("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

/// Map a transport-level failure onto the error taxonomy.
fn classify_transport_error(err: TransportError) -> ChainError {
    match err.as_error_resp() {
        Some(payload) => classify_node_message(&payload.message),
        None => ChainError::Rpc(err.to_string()),
    }
}

/// Classify a JSON-RPC error message returned by the node.
///
/// Geth-derived nodes report these conditions only through the message text,
/// so this is the one place that reads it.
pub fn classify_node_message(message: &str) -> ChainError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("nonce too low") {
        ChainError::NonceTooLow(message.to_string())
    } else if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
        ChainError::InsufficientFunds(message.to_string())
    } else {
        ChainError::Rpc(message.to_string())
    }
}
