//! Telegram testnet faucet (v1)
//!
//! Gates a native-token faucet behind Telegram channel membership.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                     FAUCET BOT                        │
//!                    │                                                       │
//!   Telegram update  │  ┌──────────┐   ┌────────────┐   ┌────────────────┐   │
//!   ─────────────────┼─▶│   bot    │──▶│ membership │   │     claim      │   │
//!                    │  │ handlers │   │    gate    │   │  orchestrator  │   │
//!                    │  └────┬─────┘   └────────────┘   └───┬────────┬───┘   │
//!                    │       │ address text                 │        │       │
//!                    │       └─────────────────────────────▶│        ▼       │
//!                    │                                      │   ┌─────────┐  │
//!                    │                                      │   │cooldown │  │
//!                    │                                      │   │ ledgers │  │
//!                    │                                      ▼   └─────────┘  │
//!                    │                               ┌────────────┐          │   JSON-RPC
//!                    │                               │ blockchain │──────────┼──────────▶ node
//!                    │                               │   client   │          │
//!                    │                               └────────────┘          │
//!                    │  ┌────────────────────────────────────────────────┐   │
//!                    │  │ config · observability · admin (/health)       │   │
//!                    │  └────────────────────────────────────────────────┘   │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use teloxide::Bot;
use tokio::net::TcpListener;

use faucet_bot::admin::{self, AdminState};
use faucet_bot::blockchain::{BlockchainClient, ChainClient, Wallet};
use faucet_bot::bot::{self as front_end, BotState, MemorySessionStore, Replies, TelegramMembership};
use faucet_bot::claim::{ClaimOrchestrator, DisbursementPolicy};
use faucet_bot::config::{load_config, loader::BOT_TOKEN_ENV_VAR};
use faucet_bot::membership::MembershipGate;
use faucet_bot::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "faucet-bot")]
#[command(about = "Telegram-gated testnet faucet", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "faucet.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init_logging(&config.observability);
    logging::install_panic_hook();

    tracing::info!("faucet-bot v{} starting", env!("CARGO_PKG_VERSION"));
    if !cli.config.exists() {
        tracing::warn!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    tracing::info!(
        rpc_url = %config.blockchain.rpc_url,
        chain_id = config.blockchain.chain_id,
        channels = config.telegram.required_channels.len(),
        amount = %config.faucet.amount,
        cooldown_hours = config.faucet.cooldown_hours,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        }
    }

    if config.telegram.bot_token.is_empty() {
        return Err(format!("Bot token missing: set {} or telegram.bot_token", BOT_TOKEN_ENV_VAR).into());
    }

    let wallet = Wallet::from_env(config.blockchain.chain_id)?;
    let client = BlockchainClient::new(config.blockchain.clone()).await?;
    if !client.is_healthy().await {
        tracing::warn!("RPC endpoint unreachable at startup; claims will fail until it recovers");
    }
    let chain: Arc<dyn ChainClient> = Arc::new(client);

    let policy = DisbursementPolicy::from_config(&config.faucet, &config.blockchain)?;
    let orchestrator = Arc::new(ClaimOrchestrator::in_memory(chain.clone(), wallet, policy));
    tracing::info!(faucet_address = %orchestrator.faucet_address(), "Faucet account ready");

    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let admin_state = AdminState {
            orchestrator: orchestrator.clone(),
            chain: chain.clone(),
            api_key: Arc::from(config.admin.api_key.as_str()),
            chain_id: config.blockchain.chain_id,
        };
        tokio::spawn(async move {
            if let Err(e) = admin::serve(listener, admin_state).await {
                tracing::error!(error = %e, "Admin endpoint stopped");
            }
        });
    }

    let bot = Bot::new(config.telegram.bot_token.clone());
    let gate = MembershipGate::new(
        Arc::new(TelegramMembership::new(bot.clone())),
        config.telegram.required_channels.clone(),
    );
    let state = Arc::new(BotState {
        gate,
        orchestrator,
        sessions: Arc::new(MemorySessionStore::new()),
        replies: Replies::from_config(&config),
    });

    front_end::run(bot, state).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
