//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! faucet.toml (optional)
//!     → loader.rs (parse & deserialize, overlay secrets from env)
//!     → validation.rs (semantic checks)
//!     → FaucetConfig (validated, immutable)
//!     → handed to each subsystem at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - The faucet private key never lives in the file; see `blockchain::wallet`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, BlockchainConfig, DisbursementConfig, FaucetConfig, ObservabilityConfig,
    TelegramConfig,
};
