//! Claim cooldown tracking.
//!
//! # Data Flow
//! ```text
//! claim attempt
//!     → ledger.rs check(key, clock.now())   (requester ledger, then address ledger)
//!     → ... disbursement succeeds ...
//!     → ledger.rs record(key, clock.now())  (both ledgers)
//!             → store.rs put(key, timestamp)
//! ```
//!
//! # Design Decisions
//! - Ledgers only read and overwrite; nothing is evicted
//! - The store is a trait object so a persistent backend can be swapped in
//! - Time comes from a `Clock` so windows are testable without sleeping

pub mod clock;
pub mod ledger;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{CooldownLedger, CooldownStatus};
pub use store::{CooldownStore, MemoryCooldownStore};
