//! Inline keyboards and callback identifiers.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

/// Callback data of the "check membership" button.
pub const CHECK_MEMBERSHIP: &str = "check_membership";

/// Callback data of the "claim" button.
pub const CLAIM_FAUCET: &str = "claim_faucet";

/// Public join link for an `@username` channel. Numeric ids have none.
pub fn channel_join_url(channel: &str) -> Option<Url> {
    let name = channel.trim().strip_prefix('@')?;
    if name.is_empty() {
        return None;
    }
    Url::parse(&format!("https://t.me/{}", name)).ok()
}

/// One join button per public channel, then the membership check.
pub fn start_menu(channels: &[String]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = channels
        .iter()
        .filter_map(|channel| {
            channel_join_url(channel)
                .map(|url| vec![InlineKeyboardButton::url(format!("Join {}", channel), url)])
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "✅ Check Membership",
        CHECK_MEMBERSHIP,
    )]);
    InlineKeyboardMarkup::new(rows)
}

pub fn claim_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "💰 Claim Faucet",
        CLAIM_FAUCET,
    )]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_channel_join_url() {
        assert_eq!(
            channel_join_url("@monad_news").unwrap().as_str(),
            "https://t.me/monad_news"
        );
        assert!(channel_join_url("-1001234567890").is_none());
        assert!(channel_join_url("@").is_none());
    }

    #[test]
    fn test_start_menu_layout() {
        let channels = vec!["@alpha".to_string(), "-100123".to_string(), "@beta".to_string()];
        let menu = start_menu(&channels);

        assert_eq!(menu.inline_keyboard.len(), 3);
        assert_eq!(menu.inline_keyboard[0][0].text, "Join @alpha");
        assert_eq!(menu.inline_keyboard[1][0].text, "Join @beta");
        match &menu.inline_keyboard[2][0].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, CHECK_MEMBERSHIP),
            other => panic!("unexpected button kind {:?}", other),
        }
    }

    #[test]
    fn test_claim_menu_callback() {
        let menu = claim_menu();
        match &menu.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, CLAIM_FAUCET),
            other => panic!("unexpected button kind {:?}", other),
        }
    }
}
