//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the faucet.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the faucet bot.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FaucetConfig {
    /// Telegram bot settings.
    pub telegram: TelegramConfig,

    /// Blockchain integration settings.
    pub blockchain: BlockchainConfig,

    /// Disbursement policy.
    pub faucet: DisbursementConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Operator HTTP endpoint.
    pub admin: AdminConfig,
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API token. Usually supplied through `FAUCET_TELEGRAM_BOT_TOKEN`.
    pub bot_token: String,

    /// Channels a requester must belong to, as `@username` or numeric chat id.
    pub required_channels: Vec<String>,
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, used for read calls.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID used for EIP-155 signing and startup verification.
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations to wait for after broadcast.
    pub confirmation_blocks: u64,

    /// Upper bound on the confirmation wait, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Explorer prefix the transaction hash is appended to.
    pub explorer_tx_url: String,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet-rpc.monad.xyz".to_string(),
            failover_urls: Vec::new(),
            chain_id: 10143,
            rpc_timeout_secs: 10,
            confirmation_blocks: 100,
            confirmation_timeout_secs: 300,
            explorer_tx_url: "https://testnet.monadexplorer.com/tx/".to_string(),
        }
    }
}

/// What a single claim sends and how often.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisbursementConfig {
    /// Amount per claim in whole native units (decimal string, e.g. "0.05").
    pub amount: String,

    /// Ticker shown to users.
    pub token_symbol: String,

    /// Fixed legacy gas price in gwei.
    pub gas_price_gwei: u64,

    /// Cooldown window applied to both requester and address.
    pub cooldown_hours: u64,
}

impl Default for DisbursementConfig {
    fn default() -> Self {
        Self {
            amount: "0.05".to_string(),
            token_symbol: "MON".to_string(),
            gas_price_gwei: 70,
            cooldown_hours: 24,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin endpoint.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin endpoint bind address.
    pub bind_address: String,
}

/// Placeholder key rejected by validation when the admin endpoint is enabled.
pub const ADMIN_KEY_PLACEHOLDER: &str = "CHANGE_ME_IN_PRODUCTION";

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: ADMIN_KEY_PLACEHOLDER.to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_faucet_policy() {
        let config = FaucetConfig::default();
        assert_eq!(config.faucet.amount, "0.05");
        assert_eq!(config.faucet.gas_price_gwei, 70);
        assert_eq!(config.faucet.cooldown_hours, 24);
        assert_eq!(config.blockchain.confirmation_blocks, 100);
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let raw = r#"
            [telegram]
            required_channels = ["@monad_news", "-1001234567890"]

            [faucet]
            amount = "0.1"
        "#;
        let config: FaucetConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.telegram.required_channels.len(), 2);
        assert_eq!(config.faucet.amount, "0.1");
        assert_eq!(config.faucet.gas_price_gwei, 70);
        assert_eq!(config.blockchain.chain_id, 10143);
    }
}
