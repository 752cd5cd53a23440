//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FaucetConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the bot token.
pub const BOT_TOKEN_ENV_VAR: &str = "FAUCET_TELEGRAM_BOT_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// A missing file is not an error: defaults are used so a deployment can be
/// driven entirely by environment variables plus a minimal file.
pub fn load_config(path: &Path) -> Result<FaucetConfig, ConfigError> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        FaucetConfig::default()
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay secrets from the environment onto a parsed config.
pub fn apply_env_overrides<F>(config: &mut FaucetConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(BOT_TOKEN_ENV_VAR).filter(|t| !t.is_empty()) {
        config.telegram.bot_token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_override_replaces_token() {
        let mut config = FaucetConfig::default();
        config.telegram.bot_token = "from-file".to_string();

        apply_env_overrides(&mut config, |key| {
            (key == BOT_TOKEN_ENV_VAR).then(|| "from-env".to_string())
        });
        assert_eq!(config.telegram.bot_token, "from-env");

        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.telegram.bot_token, "from-env");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join("faucet_bot_invalid_config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[faucet]\ngas_price_gwei = 0").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("gas_price_gwei"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_reports_parse_error() {
        let path = std::env::temp_dir().join("faucet_bot_broken_config.toml");
        fs::write(&path, "[faucet\namount = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(&path).unwrap_or_default();
    }
}
