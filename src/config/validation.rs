//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work: unparseable URLs, a zero disbursement, an empty channel list.
//! Every problem is collected so one run reports all of them.

use std::net::SocketAddr;

use alloy::primitives::utils::parse_ether;
use thiserror::Error;

use crate::config::schema::{FaucetConfig, ADMIN_KEY_PLACEHOLDER};

/// Longest accepted cooldown window: one year.
pub const MAX_COOLDOWN_HOURS: u64 = 24 * 365;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, returning every error found.
pub fn validate_config(config: &FaucetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.telegram.required_channels.is_empty() {
        errors.push(ValidationError::new(
            "telegram.required_channels",
            "at least one channel is required",
        ));
    }
    for channel in &config.telegram.required_channels {
        let trimmed = channel.trim();
        if trimmed.len() < 2 || !(trimmed.starts_with('@') || trimmed.parse::<i64>().is_ok()) {
            errors.push(ValidationError::new(
                "telegram.required_channels",
                format!("'{}' is neither @username nor a numeric chat id", channel),
            ));
        }
    }

    if let Err(e) = config.blockchain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("invalid URL '{}': {}", config.blockchain.rpc_url, e),
        ));
    }
    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be > 0"));
    }
    if config.blockchain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "blockchain.confirmation_timeout_secs",
            "must be > 0",
        ));
    }

    match parse_ether(&config.faucet.amount) {
        Ok(amount) if amount.is_zero() => {
            errors.push(ValidationError::new("faucet.amount", "must be greater than zero"));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new(
            "faucet.amount",
            format!("'{}' is not a decimal ether amount: {}", config.faucet.amount, e),
        )),
    }
    if config.faucet.gas_price_gwei == 0 {
        errors.push(ValidationError::new("faucet.gas_price_gwei", "must be > 0"));
    }
    if config.faucet.cooldown_hours == 0 {
        errors.push(ValidationError::new("faucet.cooldown_hours", "must be > 0"));
    } else if config.faucet.cooldown_hours > MAX_COOLDOWN_HOURS {
        errors.push(ValidationError::new(
            "faucet.cooldown_hours",
            format!("must be at most {}", MAX_COOLDOWN_HOURS),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled {
        if config.admin.api_key.is_empty() || config.admin.api_key == ADMIN_KEY_PLACEHOLDER {
            errors.push(ValidationError::new("admin.api_key", "set a real API key"));
        }
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "admin.bind_address",
                format!("'{}' is not a socket address", config.admin.bind_address),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> FaucetConfig {
        let mut config = FaucetConfig::default();
        config.telegram.required_channels = vec!["@monad_news".into(), "-1001234567890".into()];
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.faucet.amount = "lots".into();
        config.faucet.cooldown_hours = 0;
        config.blockchain.rpc_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["blockchain.rpc_url", "faucet.amount", "faucet.cooldown_hours"]
        );
    }

    #[test]
    fn test_cooldown_upper_bound() {
        let mut config = valid_config();
        config.faucet.cooldown_hours = MAX_COOLDOWN_HOURS;
        assert!(validate_config(&config).is_ok());

        config.faucet.cooldown_hours = u64::MAX / 1000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "faucet.cooldown_hours");
        assert!(errors[0].message.contains("at most"));
    }

    #[test]
    fn test_channel_format() {
        let mut config = valid_config();
        config.telegram.required_channels.push("monad_news".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("monad_news"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut config = valid_config();
        config.faucet.amount = "0".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "faucet.amount");
    }

    #[test]
    fn test_admin_placeholder_key_rejected() {
        let mut config = valid_config();
        config.admin.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "admin.api_key");

        config.admin.api_key = "s3cret".into();
        assert!(validate_config(&config).is_ok());
    }
}
