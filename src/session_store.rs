//! In-memory session storage keyed by Telegram user id.
//!
//! Each user owns an async mutex; the router keeps it locked for the whole
//! handling of one update so a user's updates never interleave, while
//! different users only share the sharded map lookup. Only users with an
//! active dialog keep an entry between updates.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use teloxide::types::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::dialogue::Session;

pub struct SessionStore {
    sessions: DashMap<UserId, Arc<Mutex<Session>>>,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Lock the user's session, creating it on first contact.
    ///
    /// A session idle for longer than the configured timeout comes back
    /// reset to `Idle`.
    pub async fn lock(&self, user_id: UserId) -> OwnedMutexGuard<Session> {
        // Clone the Arc so the shard guard is released before awaiting
        let slot = self
            .sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone();

        let mut session = slot.lock_owned().await;

        if let Some(timeout) = self.idle_timeout {
            if session.is_active() && session.is_expired(Instant::now(), timeout) {
                debug!(user_id = %user_id, state = ?session.state(), "Session expired, resetting");
                session.reset();
            }
        }

        session
    }

    /// Drop the user's entry if it is idle and nobody else holds it.
    ///
    /// Called after the session guard is released. An entry that another
    /// update is waiting on stays, as does an unfinished dialog.
    pub fn release_if_idle(&self, user_id: UserId) -> bool {
        // `lock` clones slots under the same shard lock, so the count is stable here
        let removed = self
            .sessions
            .remove_if(&user_id, |_, slot| {
                Arc::strong_count(slot) == 1 && slot.try_lock().is_ok_and(|s| !s.is_active())
            })
            .is_some();
        if removed {
            debug!(user_id = %user_id, "Released idle session");
        }
        removed
    }

    /// Remove abandoned dialogs older than the idle timeout.
    ///
    /// Sessions currently locked by an update are skipped. Returns how many
    /// entries were removed; always zero without a timeout.
    pub fn purge_expired(&self) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(session) => session.is_active() && !session.is_expired(now, timeout),
                Err(_) => true,
            }
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Number of users currently holding an entry
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{DialogInput, DialogState, EntryPoint};

    #[tokio::test]
    async fn test_session_persists_between_locks() {
        let store = SessionStore::default();
        let user = UserId(42);

        {
            let mut session = store.lock(user).await;
            session.apply(DialogInput::Entry(EntryPoint::Application));
        }

        let session = store.lock(user).await;
        assert_eq!(session.state(), &DialogState::ChoosingRole);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = SessionStore::default();

        let mut first = store.lock(UserId(1)).await;
        first.apply(DialogInput::Entry(EntryPoint::Idea));

        // Holding user 1's lock does not block user 2
        let second = store.lock(UserId(2)).await;
        assert!(!second.is_active());
        assert!(first.is_active());
    }

    #[tokio::test]
    async fn test_expired_session_is_reset() {
        let store = SessionStore::new(Some(Duration::ZERO));
        let user = UserId(7);

        {
            let mut session = store.lock(user).await;
            session.apply(DialogInput::Entry(EntryPoint::Idea));
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        let session = store.lock(user).await;
        assert!(!session.is_active());
        assert_eq!(session.pending_message_type(), None);
    }

    #[tokio::test]
    async fn test_idle_session_is_released() {
        let store = SessionStore::default();
        let user = UserId(3);

        {
            let mut session = store.lock(user).await;
            session.apply(DialogInput::Text("hello"));
        }
        assert!(store.release_if_idle(user));
        assert!(store.is_empty());

        // Nothing to remove the second time
        assert!(!store.release_if_idle(user));
    }

    #[tokio::test]
    async fn test_active_or_locked_session_is_kept() {
        let store = SessionStore::default();

        {
            let mut session = store.lock(UserId(1)).await;
            session.apply(DialogInput::Entry(EntryPoint::Complaint));
        }
        assert!(!store.release_if_idle(UserId(1)));

        let _held = store.lock(UserId(2)).await;
        assert!(!store.release_if_idle(UserId(2)));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_many_idle_users_leave_no_entries() {
        let store = SessionStore::new(Some(Duration::from_secs(1)));

        for id in 0..1_000 {
            let user = UserId(id);
            {
                let mut session = store.lock(user).await;
                session.apply(DialogInput::Text("hello"));
            }
            store.release_if_idle(user);
        }

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired_drops_abandoned_dialogs() {
        let store = SessionStore::new(Some(Duration::ZERO));

        {
            let mut session = store.lock(UserId(1)).await;
            session.apply(DialogInput::Entry(EntryPoint::Idea));
        }
        let _held = store.lock(UserId(2)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_without_timeout_is_noop() {
        let store = SessionStore::default();
        assert_eq!(store.purge_expired(), 0);
    }
}
