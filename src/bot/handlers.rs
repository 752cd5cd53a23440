//! Update handlers: commands, button presses, and address messages.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::keyboards::{claim_menu, start_menu, CHECK_MEMBERSHIP, CLAIM_FAUCET};
use crate::bot::session::{SessionState, SessionStore};
use crate::claim::{ClaimOrchestrator, ClaimReceipt, RequesterId};
use crate::config::FaucetConfig;
use crate::membership::MembershipGate;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Faucet commands:")]
pub enum Command {
    #[command(description = "open the faucet menu")]
    Start,
    #[command(description = "open the faucet menu")]
    Help,
}

/// How amounts and transactions are shown to users.
#[derive(Debug, Clone)]
pub struct Replies {
    pub amount: String,
    pub token_symbol: String,
    pub explorer_tx_url: String,
}

impl Replies {
    pub fn from_config(config: &FaucetConfig) -> Self {
        Self {
            amount: config.faucet.amount.clone(),
            token_symbol: config.faucet.token_symbol.clone(),
            explorer_tx_url: config.blockchain.explorer_tx_url.clone(),
        }
    }

    pub fn welcome(&self) -> String {
        format!(
            "🚰 Welcome to the {} testnet faucet!\nBefore claiming, please join our Telegram channels.",
            self.token_symbol
        )
    }

    pub fn membership_ok(&self) -> String {
        "✅ You are a member of all required channels! Press the button below, then send your wallet address."
            .to_string()
    }

    pub fn ask_address(&self) -> String {
        format!(
            "📩 Send me your wallet address to receive {} {}.",
            self.amount, self.token_symbol
        )
    }

    pub fn sending(&self) -> String {
        format!("⏳ Sending {} {}, waiting for confirmations...", self.amount, self.token_symbol)
    }

    pub fn success(&self, receipt: &ClaimReceipt) -> String {
        format!(
            "✅ Sent {} {} to {}\n🔗 Tx: {}{}",
            self.amount, self.token_symbol, receipt.recipient, self.explorer_tx_url, receipt.tx_hash
        )
    }
}

/// Everything the handlers share.
pub struct BotState {
    pub gate: MembershipGate,
    pub orchestrator: Arc<ClaimOrchestrator>,
    pub sessions: Arc<dyn SessionStore>,
    pub replies: Replies,
}

/// Dispatcher tree. Commands first, then buttons, then free text.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(Update::filter_message().endpoint(handle_text))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    tracing::debug!(chat_id = %msg.chat.id, command = ?cmd, "Command received");
    bot.send_message(msg.chat.id, state.replies.welcome())
        .reply_markup(start_menu(state.gate.channels()))
        .await?;
    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<BotState>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let requester = RequesterId(q.from.id.0);
    let chat_id = reply_chat(q.message.as_ref().map(|m| m.chat().id), q.from.id);

    match q.data.as_deref() {
        Some(CHECK_MEMBERSHIP) => match state.gate.verify(requester).await {
            Ok(()) => {
                bot.send_message(chat_id, state.replies.membership_ok())
                    .reply_markup(claim_menu())
                    .await?;
            }
            Err(e) => {
                bot.send_message(chat_id, e.user_message()).await?;
            }
        },
        Some(CLAIM_FAUCET) => {
            // Membership is re-checked here: the claim button outlives the
            // check that produced it.
            if let Err(e) = state.gate.verify(requester).await {
                bot.send_message(chat_id, e.user_message()).await?;
                return Ok(());
            }
            state.sessions.set(requester, SessionState::AwaitingAddress);
            bot.send_message(chat_id, state.replies.ask_address()).await?;
        }
        other => {
            tracing::debug!(requester = %requester, data = ?other, "Ignoring unknown callback");
        }
    }

    Ok(())
}

/// Chat a button press is answered in: the one holding the button, or the
/// presser's private chat when Telegram no longer has that message.
pub fn reply_chat(message_chat: Option<ChatId>, presser: UserId) -> ChatId {
    message_chat.unwrap_or_else(|| ChatId::from(presser))
}

/// Text to treat as a wallet address, if the sender was asked for one.
///
/// Any text leaves the session `Idle`, whatever it contains.
pub fn address_text<'a>(
    sessions: &dyn SessionStore,
    requester: RequesterId,
    text: &'a str,
) -> Option<&'a str> {
    match sessions.take(requester) {
        SessionState::AwaitingAddress => Some(text),
        SessionState::Idle => None,
    }
}

async fn handle_text(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };
    let requester = RequesterId(user.id.0);

    let Some(raw_address) = address_text(state.sessions.as_ref(), requester, text) else {
        return Ok(());
    };

    let reply = match state.orchestrator.begin_claim(requester, raw_address).await {
        Ok(ticket) => {
            bot.send_message(msg.chat.id, state.replies.sending()).await?;
            match ticket.disburse().await {
                Ok(receipt) => state.replies.success(&receipt),
                Err(e) => e.user_message(),
            }
        }
        Err(e) => e.user_message(),
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::session::MemorySessionStore;
    use alloy::primitives::{Address, TxHash, U256};

    fn replies() -> Replies {
        Replies::from_config(&FaucetConfig::default())
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "faucet_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "faucet_bot").unwrap(), Command::Help);
        assert!(Command::parse("/claim", "faucet_bot").is_err());
    }

    #[test]
    fn test_success_reply_links_explorer() {
        let receipt = ClaimReceipt {
            tx_hash: TxHash::repeat_byte(0xab),
            recipient: Address::repeat_byte(0x11),
            amount: U256::from(50_000_000_000_000_000u64),
            block_number: Some(7),
        };
        let text = replies().success(&receipt);

        assert!(text.starts_with("✅ Sent 0.05 MON to 0x1111"));
        assert!(text.contains(&format!("https://testnet.monadexplorer.com/tx/{}", receipt.tx_hash)));
    }

    #[test]
    fn test_ask_address_mentions_amount() {
        assert_eq!(
            replies().ask_address(),
            "📩 Send me your wallet address to receive 0.05 MON."
        );
    }

    #[test]
    fn test_idle_text_is_ignored() {
        let sessions = MemorySessionStore::new();
        assert_eq!(address_text(&sessions, RequesterId(7), "0xabc"), None);
        assert_eq!(sessions.get(RequesterId(7)), SessionState::Idle);
    }

    #[test]
    fn test_first_text_consumes_session_whatever_it_says() {
        let sessions = MemorySessionStore::new();
        sessions.set(RequesterId(7), SessionState::AwaitingAddress);

        assert_eq!(address_text(&sessions, RequesterId(7), "hello there"), Some("hello there"));
        assert_eq!(sessions.get(RequesterId(7)), SessionState::Idle);
        assert_eq!(address_text(&sessions, RequesterId(7), "0xabc"), None);
    }

    #[test]
    fn test_sessions_are_per_requester() {
        let sessions = MemorySessionStore::new();
        sessions.set(RequesterId(7), SessionState::AwaitingAddress);

        assert_eq!(address_text(&sessions, RequesterId(8), "text"), None);
        assert_eq!(sessions.get(RequesterId(7)), SessionState::AwaitingAddress);
    }

    #[test]
    fn test_button_answered_in_its_own_chat() {
        let group = ChatId(-1001234567890);
        assert_eq!(reply_chat(Some(group), UserId(42)), group);
        assert_eq!(reply_chat(None, UserId(42)), ChatId(42));
    }
}
