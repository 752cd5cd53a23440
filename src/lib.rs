//! Telegram-gated testnet faucet library

pub mod admin;
pub mod blockchain;
pub mod bot;
pub mod claim;
pub mod config;
pub mod cooldown;
pub mod membership;
pub mod observability;

pub use claim::ClaimOrchestrator;
pub use config::FaucetConfig;
pub use membership::MembershipGate;
