//! Process-wide session cell.
//!
//! Reads are snapshots and never block. Explicit writes (login, logout,
//! profile edits) are last-write-wins and advance the store's epoch.
//! Resolutions take a ticket when they start; one lands only if no explicit
//! write happened since and no later-started resolution has landed.

use std::sync::Arc;

use jobzee_models::{Session, User};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone)]
struct Versioned {
    session: Session,
    epoch: u64,
    issued: u64,
    landed: u64,
}

/// Taken by a resolution when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolutionTicket {
    number: u64,
    epoch: u64,
}

impl ResolutionTicket {
    pub(crate) fn number(&self) -> u64 {
        self.number
    }
}

/// Shared session store. Clones share the same cell.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Versioned>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store in the initial loading state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Versioned {
            session: Session::loading(),
            epoch: 0,
            issued: 0,
            landed: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Current session.
    pub fn get(&self) -> Session {
        self.tx.borrow().session.clone()
    }

    /// Number of explicit writes so far.
    pub fn epoch(&self) -> u64 {
        self.tx.borrow().epoch
    }

    pub fn set_authenticated(&self, user: User) {
        debug!(user_id = %user.id, role = %user.role, "Session authenticated");
        self.write(Session::authenticated(user));
    }

    pub fn set_unauthenticated(&self) {
        debug!("Session cleared");
        self.write(Session::unauthenticated());
    }

    /// Receiver that wakes whenever the session value changes.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    fn write(&self, session: Session) {
        self.tx.send_if_modified(|current| {
            current.epoch += 1;
            swap_session(current, session)
        });
    }

    /// Register a resolution that is about to ask the backend.
    pub(crate) fn begin_resolution(&self) -> ResolutionTicket {
        let mut ticket = ResolutionTicket { number: 0, epoch: 0 };
        self.tx.send_if_modified(|current| {
            current.issued += 1;
            ticket = ResolutionTicket {
                number: current.issued,
                epoch: current.epoch,
            };
            false
        });
        ticket
    }

    /// Store a resolution's answer unless it has been overtaken, or
    /// `still_wanted` no longer holds at the moment of the write.
    pub(crate) fn land_resolution(
        &self,
        ticket: ResolutionTicket,
        session: Session,
        still_wanted: impl FnOnce() -> bool,
    ) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|current| {
            if current.epoch != ticket.epoch || ticket.number <= current.landed || !still_wanted() {
                return false;
            }
            current.landed = ticket.number;
            applied = true;
            swap_session(current, session)
        });
        applied
    }
}

/// Swap in `session`; true if subscribers should hear about it.
fn swap_session(current: &mut Versioned, session: Session) -> bool {
    if current.session == session {
        return false;
    }
    current.session = session;
    true
}

/// A view's handle on session changes.
#[derive(Debug, Clone)]
pub struct SessionSubscription {
    rx: watch::Receiver<Versioned>,
}

impl SessionSubscription {
    /// Latest session, marking it seen.
    pub fn current(&mut self) -> Session {
        self.rx.borrow_and_update().session.clone()
    }

    /// Wait for the next change. `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobzee_models::{Role, UserId};

    fn user(role: Role) -> User {
        User {
            id: UserId::from_string("u-1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555".to_string(),
            role,
            profile_picture: None,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let store = SessionStore::new();
        let session = store.get();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(store.epoch(), 0);
    }

    #[test]
    fn test_set_authenticated_then_get() {
        let store = SessionStore::new();
        let u = user(Role::Employer);

        store.set_authenticated(u.clone());
        let first = store.get();
        store.set_authenticated(u.clone());
        let second = store.get();

        assert_eq!(first, Session::authenticated(u.clone()));
        assert_eq!(first, second);
        assert!(second.is_authenticated());
        assert!(!second.is_loading());
        assert_eq!(second.user(), Some(&u));
    }

    #[test]
    fn test_set_unauthenticated_then_get() {
        let store = SessionStore::new();
        store.set_authenticated(user(Role::JobSeeker));
        store.set_unauthenticated();

        let session = store.get();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_every_write_advances_epoch() {
        let store = SessionStore::new();
        store.set_unauthenticated();
        store.set_unauthenticated();
        assert_eq!(store.epoch(), 2);
    }

    #[test]
    fn test_explicit_write_overtakes_resolution() {
        let store = SessionStore::new();
        let ticket = store.begin_resolution();
        store.set_unauthenticated();

        let applied = store.land_resolution(ticket, Session::authenticated(user(Role::Admin)), || true);
        assert!(!applied);
        assert!(!store.get().is_authenticated());
    }

    #[test]
    fn test_land_resolution_respects_predicate() {
        let store = SessionStore::new();
        let ticket = store.begin_resolution();
        let applied = store.land_resolution(ticket, Session::unauthenticated(), || false);
        assert!(!applied);
        assert!(store.get().is_loading());
    }

    #[test]
    fn test_later_resolution_beats_earlier_one() {
        let store = SessionStore::new();
        let before_login = store.begin_resolution();
        let after_login = store.begin_resolution();
        assert!(after_login.number() > before_login.number());

        assert!(store.land_resolution(after_login, Session::authenticated(user(Role::JobSeeker)), || true));
        assert!(!store.land_resolution(before_login, Session::unauthenticated(), || true));
        assert!(store.get().is_authenticated());
    }

    #[test]
    fn test_later_resolution_overrides_earlier_answer() {
        let store = SessionStore::new();
        let before_login = store.begin_resolution();
        let after_login = store.begin_resolution();

        assert!(store.land_resolution(before_login, Session::unauthenticated(), || true));
        assert!(store.land_resolution(after_login, Session::authenticated(user(Role::JobSeeker)), || true));
        assert!(store.get().is_authenticated());
        assert_eq!(store.epoch(), 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SessionStore::new();
        let mut sub = store.subscribe();
        assert!(sub.current().is_loading());

        store.set_authenticated(user(Role::JobSeeker));
        assert!(sub.changed().await);
        assert!(sub.current().is_authenticated());
    }
}
