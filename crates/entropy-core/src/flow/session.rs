//! Per-participant session state and the in-memory store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::flow::machine::FlowState;
use crate::wallet::Wallet;

/// Conversation state for one participant.
///
/// `pending_address`/`pending_amount` are only meaningful while
/// `state` is `AwaitingAddress`, `AwaitingAmount` or `ConfirmPending`;
/// every transition that leaves those states clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub state: FlowState,
    pub wallet: Option<Wallet>,
    pub last_quoted_price: Option<f64>,
    pub pending_address: Option<String>,
    pub pending_amount: Option<String>,
}

impl Session {
    pub fn clear_pending(&mut self) {
        self.pending_address = None;
        self.pending_amount = None;
    }
}

/// In-memory session store keyed by participant identity.
///
/// `get` lazily creates a fresh idle session; `put` is a full
/// overwrite, last-writer-wins. The lock is held only for the map
/// access, never across an external call; per-participant event
/// ordering is the transport's responsibility (one worker queue per
/// participant).
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the participant's session, creating a fresh
    /// idle one if absent.
    pub fn get(&self, participant_id: i64) -> Session {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        sessions.entry(participant_id).or_default().clone()
    }

    /// Stores the participant's session, replacing any previous value.
    pub fn put(&self, participant_id: i64, session: Session) {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        sessions.insert(participant_id, session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// get creates a fresh idle session on first access.
    #[test]
    fn test_get_creates_fresh_session() {
        let store = SessionStore::new();
        let session = store.get(7);
        assert_eq!(session.state, FlowState::Idle);
        assert!(session.wallet.is_none());
        assert!(session.last_quoted_price.is_none());
        assert!(session.pending_address.is_none());
        assert!(session.pending_amount.is_none());
    }

    /// put overwrites, get returns the stored value.
    #[test]
    fn test_put_then_get_round_trip() {
        let store = SessionStore::new();
        let mut session = store.get(7);
        session.state = FlowState::AwaitingAddress;
        session.pending_address = Some("0xabc".to_string());
        store.put(7, session.clone());

        assert_eq!(store.get(7), session);
    }

    /// Sessions for different participants are independent.
    #[test]
    fn test_cross_session_isolation() {
        let store = SessionStore::new();
        let mut a = store.get(1);
        a.state = FlowState::WalletReady;
        store.put(1, a);

        let b = store.get(2);
        assert_eq!(b.state, FlowState::Idle);
    }
}
