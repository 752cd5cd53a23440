//! Shared fixtures for claim-flow integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use faucet_bot::blockchain::{
    ChainClient, ChainError, ChainResult, SignedTransaction, SubmittedTransaction, Wallet,
};
use faucet_bot::claim::{ClaimOrchestrator, DisbursementPolicy};
use faucet_bot::cooldown::{CooldownLedger, ManualClock, MemoryCooldownStore};

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const CHAIN_ID: u64 = 10143;
pub const DAY: Duration = Duration::from_secs(24 * 3600);

pub const ADDRESS_A: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const ADDRESS_B: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

/// Scriptable chain client that records every call.
pub struct MockChain {
    pub pending: AtomicU64,
    pub latest: AtomicU64,
    pub gas_limit: u64,
    pub calls: AtomicUsize,
    pub submitted: Mutex<Vec<SignedTransaction>>,
    submit_error: Mutex<Option<ChainError>>,
    estimate_error: Mutex<Option<ChainError>>,
    /// When set, `submit` signals `entered` and parks until `release`.
    hold: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl MockChain {
    pub fn new(pending: u64, latest: u64) -> Self {
        Self {
            pending: AtomicU64::new(pending),
            latest: AtomicU64::new(latest),
            gas_limit: 21_000,
            calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            submit_error: Mutex::new(None),
            estimate_error: Mutex::new(None),
            hold: None,
        }
    }

    /// Park inside `submit` until released. Returns (entered, release).
    pub fn holding(mut self) -> (Self, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.hold = Some((entered.clone(), release.clone()));
        (self, entered, release)
    }

    pub fn fail_next_submit(&self, err: ChainError) {
        *self.submit_error.lock().unwrap() = Some(err);
    }

    pub fn fail_next_estimate(&self, err: ChainError) {
        *self.estimate_error.lock().unwrap() = Some(err);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn pending_transaction_count(&self, _address: Address) -> ChainResult<u64> {
        self.touch();
        Ok(self.pending.load(Ordering::SeqCst))
    }

    async fn latest_transaction_count(&self, _address: Address) -> ChainResult<u64> {
        self.touch();
        Ok(self.latest.load(Ordering::SeqCst))
    }

    async fn estimate_transfer_gas(&self, _from: Address, _to: Address, _value: U256) -> ChainResult<u64> {
        self.touch();
        match self.estimate_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.gas_limit),
        }
    }

    async fn submit(
        &self,
        tx: &SignedTransaction,
        _confirmations: u64,
    ) -> ChainResult<SubmittedTransaction> {
        self.touch();
        if let Some((entered, release)) = &self.hold {
            entered.notify_one();
            release.notified().await;
        }
        if let Some(err) = self.submit_error.lock().unwrap().take() {
            return Err(err);
        }
        self.submitted.lock().unwrap().push(tx.clone());
        Ok(SubmittedTransaction {
            hash: tx.hash,
            block_number: Some(1_000),
        })
    }

    async fn balance(&self, _address: Address) -> ChainResult<U256> {
        self.touch();
        Ok(U256::from(10u64).pow(U256::from(18u64)))
    }

    async fn block_number(&self) -> ChainResult<u64> {
        self.touch();
        Ok(1_100)
    }
}

pub fn start_time() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn policy() -> DisbursementPolicy {
    DisbursementPolicy {
        amount: U256::from(50_000_000_000_000_000u64),
        gas_price: 70_000_000_000,
        confirmations: 100,
        cooldown: DAY,
    }
}

/// Orchestrator over `chain` with in-memory ledgers and a manual clock.
pub fn build_orchestrator(chain: Arc<MockChain>) -> (Arc<ClaimOrchestrator>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, CHAIN_ID).unwrap();
    let orchestrator = ClaimOrchestrator::new(
        chain,
        wallet,
        policy(),
        CooldownLedger::new("requester", DAY, Arc::new(MemoryCooldownStore::new())),
        CooldownLedger::new("address", DAY, Arc::new(MemoryCooldownStore::new())),
        clock.clone(),
    );
    (Arc::new(orchestrator), clock)
}

pub fn address(text: &str) -> Address {
    text.parse().unwrap()
}

pub fn is_hash(hash: &TxHash) -> bool {
    *hash != TxHash::ZERO
}
