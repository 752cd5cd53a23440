//! Telegram front-end.
//!
//! # Data Flow
//! ```text
//! /start            → welcome + join buttons + "check membership"
//! check_membership  → MembershipGate → "claim" button or failure text
//! claim_faucet      → MembershipGate → session = AwaitingAddress
//! text message      → session.take() == AwaitingAddress ? ClaimOrchestrator : ignore
//! ```
//!
//! # Design Decisions
//! - Session state lives behind `SessionStore`, not in the handlers
//! - Handler errors are logged by the dispatcher; the bot keeps polling

pub mod handlers;
pub mod keyboards;
pub mod session;
pub mod telegram;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub use handlers::{BotState, Command, Replies};
pub use session::{MemorySessionStore, SessionState, SessionStore};
pub use telegram::TelegramMembership;

/// Register commands and poll for updates until Ctrl-C.
pub async fn run(bot: Bot, state: Arc<BotState>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    tracing::info!("Bot dispatcher starting");

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            tracing::trace!(update_id = ?update.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bot dispatcher stopped");
}
