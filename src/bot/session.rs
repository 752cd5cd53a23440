//! Per-requester conversation state.

use dashmap::DashMap;

use crate::claim::RequesterId;

/// Where a requester is in the claim conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Free text from this requester is ignored.
    #[default]
    Idle,
    /// The next text message is treated as a wallet address.
    AwaitingAddress,
}

/// Storage for session state, owned by the front-end.
pub trait SessionStore: Send + Sync {
    fn get(&self, requester: RequesterId) -> SessionState;

    fn set(&self, requester: RequesterId, state: SessionState);

    /// Return the current state and reset the requester to `Idle`.
    fn take(&self, requester: RequesterId) -> SessionState;
}

/// In-memory session store. Idle requesters have no entry.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: DashMap<RequesterId, SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, requester: RequesterId) -> SessionState {
        self.inner
            .get(&requester)
            .map(|r| *r.value())
            .unwrap_or_default()
    }

    fn set(&self, requester: RequesterId, state: SessionState) {
        match state {
            SessionState::Idle => {
                self.inner.remove(&requester);
            }
            other => {
                self.inner.insert(requester, other);
            }
        }
    }

    fn take(&self, requester: RequesterId) -> SessionState {
        self.inner
            .remove(&requester)
            .map(|(_, state)| state)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_requester_is_idle() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(RequesterId(1)), SessionState::Idle);
        assert_eq!(store.take(RequesterId(1)), SessionState::Idle);
    }

    #[test]
    fn test_take_consumes_awaiting_state() {
        let store = MemorySessionStore::new();
        store.set(RequesterId(1), SessionState::AwaitingAddress);
        assert_eq!(store.get(RequesterId(1)), SessionState::AwaitingAddress);

        assert_eq!(store.take(RequesterId(1)), SessionState::AwaitingAddress);
        assert_eq!(store.take(RequesterId(1)), SessionState::Idle);
        assert!(store.is_empty());
    }

    #[test]
    fn test_setting_idle_drops_entry() {
        let store = MemorySessionStore::new();
        store.set(RequesterId(1), SessionState::AwaitingAddress);
        store.set(RequesterId(2), SessionState::AwaitingAddress);
        store.set(RequesterId(1), SessionState::Idle);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(RequesterId(2)), SessionState::AwaitingAddress);
    }
}
