//! Claim processing: validation, cooldowns, and the disbursement itself.
//!
//! # Flow
//! ```text
//! begin_claim:  raw text ─▶ parse_address ─▶ requester ledger ─▶ address ledger
//!                ─▶ in-flight guard ─▶ pending/latest nonce check
//! disburse:      estimate gas ─▶ sign ─▶ broadcast + confirm
//!                ─▶ record both ledgers
//! ```
//!
//! Ledgers change only after a confirmed broadcast; every rejection and
//! failure leaves them untouched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::primitives::utils::{parse_ether, UnitsError};
use alloy::primitives::{Address, TxHash, U256};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::blockchain::transaction::{gwei_to_wei, TxBuilder};
use crate::blockchain::{ChainClient, Wallet};
use crate::claim::errors::ClaimError;
use crate::claim::request::{parse_address, RequesterId};
use crate::config::{BlockchainConfig, DisbursementConfig};
use crate::cooldown::{Clock, CooldownLedger, MemoryCooldownStore, SystemClock};
use crate::observability::metrics;

/// Result of a claim attempt.
pub type ClaimOutcome = Result<ClaimReceipt, ClaimError>;

/// What was sent, for the success reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub tx_hash: TxHash,
    pub recipient: Address,
    pub amount: U256,
    pub block_number: Option<u64>,
}

/// Fixed parameters of every disbursement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisbursementPolicy {
    /// Amount per claim, in wei.
    pub amount: U256,
    /// Legacy gas price, in wei.
    pub gas_price: u128,
    /// Confirmations to wait for before reporting success.
    pub confirmations: u64,
    /// Cooldown window for both ledgers.
    pub cooldown: Duration,
}

impl DisbursementPolicy {
    pub fn from_config(
        faucet: &DisbursementConfig,
        chain: &BlockchainConfig,
    ) -> Result<Self, UnitsError> {
        Ok(Self {
            amount: parse_ether(&faucet.amount)?,
            gas_price: gwei_to_wei(faucet.gas_price_gwei),
            confirmations: chain.confirmation_blocks,
            cooldown: Duration::from_secs(faucet.cooldown_hours.saturating_mul(3600)),
        })
    }
}

/// Drives a claim from user text to a confirmed transfer.
pub struct ClaimOrchestrator {
    chain: Arc<dyn ChainClient>,
    wallet: Wallet,
    policy: DisbursementPolicy,
    requester_cooldowns: CooldownLedger<RequesterId>,
    address_cooldowns: CooldownLedger<Address>,
    clock: Arc<dyn Clock>,
    /// Held from the nonce check until the broadcast settles, so at most one
    /// disbursement per faucet account is in flight.
    in_flight: Mutex<()>,
}

impl ClaimOrchestrator {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        wallet: Wallet,
        policy: DisbursementPolicy,
        requester_cooldowns: CooldownLedger<RequesterId>,
        address_cooldowns: CooldownLedger<Address>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chain,
            wallet,
            policy,
            requester_cooldowns,
            address_cooldowns,
            clock,
            in_flight: Mutex::new(()),
        }
    }

    /// Orchestrator with in-memory ledgers and the system clock.
    pub fn in_memory(chain: Arc<dyn ChainClient>, wallet: Wallet, policy: DisbursementPolicy) -> Self {
        let window = policy.cooldown;
        Self::new(
            chain,
            wallet,
            policy,
            CooldownLedger::new("requester", window, Arc::new(MemoryCooldownStore::new())),
            CooldownLedger::new("address", window, Arc::new(MemoryCooldownStore::new())),
            Arc::new(SystemClock),
        )
    }

    pub fn faucet_address(&self) -> Address {
        self.wallet.address()
    }

    pub fn policy(&self) -> &DisbursementPolicy {
        &self.policy
    }

    pub fn requester_cooldowns(&self) -> &CooldownLedger<RequesterId> {
        &self.requester_cooldowns
    }

    pub fn address_cooldowns(&self) -> &CooldownLedger<Address> {
        &self.address_cooldowns
    }

    /// Validate and, if eligible, pay out one claim.
    pub async fn process_claim(&self, requester: RequesterId, raw_address: &str) -> ClaimOutcome {
        self.begin_claim(requester, raw_address).await?.disburse().await
    }

    /// Run every check that can reject a claim without sending anything.
    ///
    /// On success the returned ticket holds the in-flight guard; no other
    /// claim can start until it is disbursed or dropped.
    pub async fn begin_claim(
        &self,
        requester: RequesterId,
        raw_address: &str,
    ) -> Result<ClaimTicket<'_>, ClaimError> {
        let claim_id = Uuid::new_v4();
        let span = tracing::info_span!("claim", %claim_id, requester = %requester);
        let started = Instant::now();

        match self
            .check_eligibility(requester, raw_address)
            .instrument(span.clone())
            .await
        {
            Ok((recipient, nonce, guard)) => Ok(ClaimTicket {
                orchestrator: self,
                requester,
                recipient,
                nonce,
                span,
                started,
                _guard: guard,
            }),
            Err(e) => {
                metrics::record_claim(e.kind(), started.elapsed());
                Err(e)
            }
        }
    }

    async fn check_eligibility(
        &self,
        requester: RequesterId,
        raw_address: &str,
    ) -> Result<(Address, u64, MutexGuard<'_, ()>), ClaimError> {
        let Some(recipient) = parse_address(raw_address) else {
            tracing::debug!("Rejected malformed address");
            return Err(ClaimError::InvalidAddress(raw_address.trim().to_string()));
        };

        self.check_cooldowns(requester, recipient)?;

        let Ok(guard) = self.in_flight.try_lock() else {
            tracing::info!(recipient = %recipient, "Another disbursement is in flight");
            return Err(ClaimError::TransactionPending);
        };

        // A claim by the same requester may have completed while this one was
        // between the first check and the guard.
        self.check_cooldowns(requester, recipient)?;

        let counts = self
            .chain
            .transaction_counts(self.wallet.address())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to read faucet nonce");
                ClaimError::from(e)
            })?;
        if counts.has_unconfirmed() {
            tracing::info!(
                pending = counts.pending,
                latest = counts.latest,
                "Faucet account has an unconfirmed transaction"
            );
            return Err(ClaimError::TransactionPending);
        }

        Ok((recipient, counts.latest, guard))
    }

    fn check_cooldowns(&self, requester: RequesterId, recipient: Address) -> Result<(), ClaimError> {
        let now = self.clock.now();

        let status = self.requester_cooldowns.check(&requester, now);
        if status.is_active() {
            return Err(ClaimError::RequesterCooldown {
                hours_left: status.remaining_hours(),
            });
        }

        let status = self.address_cooldowns.check(&recipient, now);
        if status.is_active() {
            return Err(ClaimError::AddressCooldown {
                address: recipient,
                hours_left: status.remaining_hours(),
            });
        }

        Ok(())
    }

    async fn send_transfer(&self, recipient: Address, nonce: u64) -> Result<ClaimReceipt, ClaimError> {
        let intent = TxBuilder::new(self.chain.as_ref(), &self.wallet)
            .transfer(recipient, self.policy.amount, self.policy.gas_price, nonce)
            .await?;
        let signed = self.wallet.sign_transaction(&intent).await?;
        let submitted = self.chain.submit(&signed, self.policy.confirmations).await?;

        Ok(ClaimReceipt {
            tx_hash: submitted.hash,
            recipient,
            amount: intent.amount,
            block_number: submitted.block_number,
        })
    }
}

/// A claim that passed every check and is cleared to send.
pub struct ClaimTicket<'a> {
    orchestrator: &'a ClaimOrchestrator,
    requester: RequesterId,
    recipient: Address,
    nonce: u64,
    span: Span,
    started: Instant,
    _guard: MutexGuard<'a, ()>,
}

impl ClaimTicket<'_> {
    pub fn recipient(&self) -> Address {
        self.recipient
    }

    /// Sign, broadcast and wait for confirmations, then record both ledgers.
    pub async fn disburse(self) -> ClaimOutcome {
        let ClaimTicket {
            orchestrator,
            requester,
            recipient,
            nonce,
            span,
            started,
            _guard,
        } = self;

        let outcome = async {
            let receipt = match orchestrator.send_transfer(recipient, nonce).await {
                Ok(receipt) => receipt,
                Err(e) => {
                    tracing::warn!(recipient = %recipient, kind = e.kind(), error = %e, "Disbursement failed");
                    return Err(e);
                }
            };

            let now = orchestrator.clock.now();
            orchestrator.requester_cooldowns.record(requester, now);
            orchestrator.address_cooldowns.record(recipient, now);

            tracing::info!(
                recipient = %recipient,
                tx_hash = %receipt.tx_hash,
                block_number = ?receipt.block_number,
                "Disbursement confirmed"
            );
            Ok(receipt)
        }
        .instrument(span)
        .await;

        let label = match &outcome {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_claim(label, started.elapsed());
        outcome
    }
}
