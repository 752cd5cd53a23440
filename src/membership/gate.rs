//! Channel membership verification.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::claim::RequesterId;
use crate::observability::metrics;

/// Error returned by a membership source when the platform query fails.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// A requester's standing in one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Only full members, admins and the owner pass the gate.
    pub fn grants_access(self) -> bool {
        matches!(
            self,
            MemberStatus::Owner | MemberStatus::Administrator | MemberStatus::Member
        )
    }
}

/// Where membership records come from.
#[async_trait]
pub trait MembershipSource: Send + Sync {
    async fn member_status(
        &self,
        channel: &str,
        requester: RequesterId,
    ) -> Result<MemberStatus, SourceError>;
}

/// Why a requester did not pass the gate.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The requester is not (or no longer) in the channel.
    #[error("requester is not a member of {channel}")]
    NotMember { channel: String },

    /// The platform refused or failed the lookup, typically because the bot
    /// is not an administrator of the channel.
    #[error("membership query for {channel} failed: {reason}")]
    QueryFailed { channel: String, reason: String },
}

impl MembershipError {
    /// One-line reply for the chat.
    pub fn user_message(&self) -> String {
        match self {
            MembershipError::NotMember { channel } => {
                format!("❌ You need to join {} first!", channel)
            }
            MembershipError::QueryFailed { .. } => {
                "❌ Error checking membership. Make sure the bot is an admin in the channels."
                    .to_string()
            }
        }
    }
}

/// Checks a requester against the fixed list of required channels.
#[derive(Clone)]
pub struct MembershipGate {
    source: Arc<dyn MembershipSource>,
    channels: Vec<String>,
}

impl MembershipGate {
    pub fn new(source: Arc<dyn MembershipSource>, channels: Vec<String>) -> Self {
        Self { source, channels }
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Pass only if the requester is present in every channel.
    ///
    /// Channels are checked in configured order and the first failure is
    /// returned.
    pub async fn verify(&self, requester: RequesterId) -> Result<(), MembershipError> {
        for channel in &self.channels {
            let status = match self.source.member_status(channel, requester).await {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!(
                        requester = %requester,
                        channel = %channel,
                        error = %e,
                        "Membership query failed"
                    );
                    metrics::record_membership_check("query_failed");
                    return Err(MembershipError::QueryFailed {
                        channel: channel.clone(),
                        reason: e.to_string(),
                    });
                }
            };

            if !status.grants_access() {
                tracing::info!(
                    requester = %requester,
                    channel = %channel,
                    status = ?status,
                    "Requester not a member"
                );
                metrics::record_membership_check("not_member");
                return Err(MembershipError::NotMember {
                    channel: channel.clone(),
                });
            }
        }

        metrics::record_membership_check("passed");
        Ok(())
    }
}
