//! Membership gate: a requester must belong to every required channel
//! before the claim button is offered.

pub mod gate;

pub use gate::{MemberStatus, MembershipError, MembershipGate, MembershipSource, SourceError};
