//! Claim rejection and failure taxonomy.

use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::ChainError;

/// Every way a claim can end without funds being sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("requester claimed within the window, {hours_left}h left")]
    RequesterCooldown { hours_left: u64 },

    #[error("address {address} claimed within the window, {hours_left}h left")]
    AddressCooldown { address: Address, hours_left: u64 },

    #[error("a previous disbursement is still pending")]
    TransactionPending,

    #[error("nonce too low: {0}")]
    NonceTooLow(String),

    #[error("faucet account has insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u64),

    #[error("disbursement failed: {0}")]
    Unknown(String),
}

impl ClaimError {
    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClaimError::InvalidAddress(_) => "invalid_address",
            ClaimError::RequesterCooldown { .. } => "requester_cooldown",
            ClaimError::AddressCooldown { .. } => "address_cooldown",
            ClaimError::TransactionPending => "transaction_pending",
            ClaimError::NonceTooLow(_) => "nonce_too_low",
            ClaimError::InsufficientFunds(_) => "insufficient_funds",
            ClaimError::ConfirmationTimeout(_) => "confirmation_timeout",
            ClaimError::Unknown(_) => "unknown",
        }
    }

    /// One-line reply for the chat.
    pub fn user_message(&self) -> String {
        match self {
            ClaimError::InvalidAddress(_) => {
                "❌ Invalid wallet address. Please enter a valid Ethereum address.".to_string()
            }
            ClaimError::RequesterCooldown { hours_left } => format!(
                "❌ You can only claim once per cooldown window. Please try again in {}.",
                hours(*hours_left)
            ),
            ClaimError::AddressCooldown { hours_left, .. } => format!(
                "❌ This wallet address has already been used to claim recently. Please try again in {}.",
                hours(*hours_left)
            ),
            ClaimError::TransactionPending => {
                "❌ A previous transaction is still pending. Please wait a moment and try again."
                    .to_string()
            }
            ClaimError::NonceTooLow(_) => {
                "❌ Nonce too low. Wait for the previous transaction to finish or try again later."
                    .to_string()
            }
            ClaimError::InsufficientFunds(_) => {
                "❌ The faucet is out of funds. Please wait for a refill.".to_string()
            }
            ClaimError::ConfirmationTimeout(_) => {
                "❌ The transaction is taking a long time. Check the explorer for its status."
                    .to_string()
            }
            ClaimError::Unknown(_) => "❌ Transaction failed. Try again later.".to_string(),
        }
    }
}

fn hours(n: u64) -> String {
    if n == 1 {
        "1 hour".to_string()
    } else {
        format!("{} hours", n)
    }
}

impl From<ChainError> for ClaimError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::NonceTooLow(msg) => ClaimError::NonceTooLow(msg),
            ChainError::InsufficientFunds(msg) => ClaimError::InsufficientFunds(msg),
            ChainError::ConfirmationTimeout(blocks) => ClaimError::ConfirmationTimeout(blocks),
            other => ClaimError::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_error_mapping() {
        assert!(matches!(
            ClaimError::from(ChainError::NonceTooLow("x".into())),
            ClaimError::NonceTooLow(_)
        ));
        assert!(matches!(
            ClaimError::from(ChainError::InsufficientFunds("x".into())),
            ClaimError::InsufficientFunds(_)
        ));
        assert!(matches!(
            ClaimError::from(ChainError::ConfirmationTimeout(100)),
            ClaimError::ConfirmationTimeout(100)
        ));
        assert!(matches!(
            ClaimError::from(ChainError::Reverted("0xabc".into())),
            ClaimError::Unknown(_)
        ));
        assert!(matches!(
            ClaimError::from(ChainError::Timeout(10)),
            ClaimError::Unknown(_)
        ));
    }

    #[test]
    fn test_cooldown_message_includes_hours() {
        let err = ClaimError::RequesterCooldown { hours_left: 5 };
        assert!(err.user_message().contains("5 hours"));

        let err = ClaimError::RequesterCooldown { hours_left: 1 };
        assert!(err.user_message().contains("1 hour."));
    }
}
