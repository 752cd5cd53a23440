//! Telegram-backed membership lookups.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, Recipient};

use crate::claim::RequesterId;
use crate::membership::{MemberStatus, MembershipSource, SourceError};

/// Resolves membership through `getChatMember`. The bot must be an
/// administrator of every channel it is asked about.
#[derive(Clone)]
pub struct TelegramMembership {
    bot: Bot,
}

impl TelegramMembership {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// `@username` or numeric chat id, as written in the config.
pub fn channel_recipient(channel: &str) -> Recipient {
    let channel = channel.trim();
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(channel.to_string()),
    }
}

fn map_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Owner,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Banned,
    }
}

#[async_trait]
impl MembershipSource for TelegramMembership {
    async fn member_status(
        &self,
        channel: &str,
        requester: RequesterId,
    ) -> Result<MemberStatus, SourceError> {
        let member = self
            .bot
            .get_chat_member(channel_recipient(channel), UserId(requester.0))
            .await?;
        Ok(map_status(member.status()))
    }
}
