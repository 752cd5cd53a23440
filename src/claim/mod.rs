//! Claim subsystem.
//!
//! # Data Flow
//! ```text
//! bot text message (requester, raw text)
//!     → request.rs (address parsing)
//!     → orchestrator.rs (cooldowns, in-flight guard, then disbursement)
//!     → errors.rs (rejections rendered as one-line replies)
//! ```

pub mod errors;
pub mod orchestrator;
pub mod request;

pub use errors::ClaimError;
pub use orchestrator::{ClaimOrchestrator, ClaimOutcome, ClaimReceipt, ClaimTicket, DisbursementPolicy};
pub use request::{parse_address, RequesterId};
