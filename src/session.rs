//! The client's record of who is signed in.
//!
//! One [`Session`] handle is shared by the transport and every caller; it is
//! explicitly constructed and injected, never a process-wide global, so
//! isolated sessions can coexist in tests.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::models::User;
use crate::storage::{PersistedSession, PersistedState, SessionStorage, STORAGE_VERSION};

/// In-memory session state.
///
/// `is_authenticated` is derived, never stored: a session is authenticated
/// exactly when it holds both an access token and a user snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

struct Guarded {
    state: SessionState,
    /// Bumped on every mutation; the transport uses it to tell whether the
    /// token it failed with has already been replaced.
    generation: u64,
}

struct Inner {
    guarded: RwLock<Guarded>,
    storage: Box<dyn SessionStorage>,
    changes: watch::Sender<SessionState>,
}

/// Cheaply clonable handle to the session. Clones share state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Restore the session from storage, or start signed out.
    ///
    /// A blob written by a different format version, or one that fails to
    /// parse, is discarded with a warning rather than propagated: a corrupt
    /// session file must never keep the app from starting.
    pub fn restore(storage: impl SessionStorage + 'static) -> Self {
        let state = match storage.load() {
            Ok(Some(blob)) if blob.version == STORAGE_VERSION => SessionState {
                user: blob.state.user,
                access_token: blob.state.access_token,
                refresh_token: blob.state.refresh_token,
            },
            Ok(Some(blob)) => {
                tracing::warn!(
                    found = blob.version,
                    expected = STORAGE_VERSION,
                    "discarding persisted session with unknown version"
                );
                SessionState::default()
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted session, starting signed out");
                SessionState::default()
            }
        };

        let (changes, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(Inner {
                guarded: RwLock::new(Guarded {
                    state,
                    generation: 0,
                }),
                storage: Box::new(storage),
                changes,
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.inner.guarded.read().state.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.guarded.read().state.user.clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.inner.guarded.read().state.access_token.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.guarded.read().state.refresh_token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.guarded.read().state.is_authenticated()
    }

    /// Watch session changes.
    ///
    /// Subscribers see every transition, including the forced sign-out after
    /// an unrecoverable refresh failure; the UI reacts to that here (e.g.
    /// navigating back to the login screen).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.changes.subscribe()
    }

    pub(crate) fn token_generation(&self) -> u64 {
        self.inner.guarded.read().generation
    }

    /// Store the result of a successful login.
    pub(crate) fn establish(&self, user: User, access_token: String, refresh_token: String) {
        self.mutate(|state| {
            state.user = Some(user);
            state.access_token = Some(access_token);
            state.refresh_token = Some(refresh_token);
        });
    }

    /// Replace the user snapshot (profile refetch), keeping tokens.
    pub(crate) fn replace_user(&self, user: User) {
        self.mutate(|state| state.user = Some(user));
    }

    /// Install a freshly exchanged access token, keeping user and refresh
    /// token.
    pub(crate) fn set_access_token(&self, access_token: String) {
        self.mutate(|state| state.access_token = Some(access_token));
    }

    /// Sign out: drop the user and both tokens. Idempotent.
    pub(crate) fn clear(&self) {
        self.mutate(|state| *state = SessionState::default());
    }

    fn mutate(&self, apply: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut guarded = self.inner.guarded.write();
            apply(&mut guarded.state);
            guarded.generation += 1;
            guarded.state.clone()
        };
        self.persist(&snapshot);
        self.inner.changes.send_replace(snapshot);
    }

    fn persist(&self, state: &SessionState) {
        let result = if *state == SessionState::default() {
            self.inner.storage.clear()
        } else {
            self.inner.storage.save(&PersistedSession {
                state: PersistedState {
                    user: state.user.clone(),
                    is_authenticated: state.is_authenticated(),
                    access_token: state.access_token.clone(),
                    refresh_token: state.refresh_token.clone(),
                },
                version: STORAGE_VERSION,
            })
        };
        if let Err(e) = result {
            // The in-memory session stays usable; only durability suffers.
            tracing::warn!(error = %e, "failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::UserId;

    fn alice() -> User {
        User::new(UserId::from("u1".to_string()), "alice", "alice@campus.edu")
    }

    #[test]
    fn starts_signed_out() {
        let session = Session::restore(MemoryStorage::new());
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn establish_authenticates() {
        let session = Session::restore(MemoryStorage::new());
        session.establish(alice(), "at1".into(), "rt1".into());
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().username, "alice");
    }

    #[test]
    fn token_without_user_is_not_authenticated() {
        let storage = MemoryStorage::new();
        storage
            .save(&PersistedSession {
                state: PersistedState {
                    user: None,
                    is_authenticated: true,
                    access_token: Some("at1".into()),
                    refresh_token: None,
                },
                version: STORAGE_VERSION,
            })
            .unwrap();

        // The persisted flag lies; the derived invariant wins.
        let session = Session::restore(storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clear_is_idempotent() {
        let session = Session::restore(MemoryStorage::new());
        session.establish(alice(), "at1".into(), "rt1".into());

        session.clear();
        let after_one = session.current();
        session.clear();
        assert_eq!(session.current(), after_one);
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn persists_and_restores_across_instances() {
        let storage = MemoryStorage::new();
        let session = Session::restore(storage.clone());
        session.establish(alice(), "at1".into(), "rt1".into());

        // Simulated reload: a fresh handle over the same storage.
        let restored = Session::restore(storage);
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().unwrap().id, session.user().unwrap().id);
        assert_eq!(restored.refresh_token().as_deref(), Some("rt1"));
    }

    #[test]
    fn version_mismatch_discards_blob() {
        let storage = MemoryStorage::new();
        storage
            .save(&PersistedSession {
                state: PersistedState {
                    user: Some(alice()),
                    is_authenticated: true,
                    access_token: Some("at1".into()),
                    refresh_token: Some("rt1".into()),
                },
                version: STORAGE_VERSION + 1,
            })
            .unwrap();

        let session = Session::restore(storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_removes_the_persisted_blob() {
        let storage = MemoryStorage::new();
        let session = Session::restore(storage.clone());
        session.establish(alice(), "at1".into(), "rt1".into());
        assert!(storage.load().unwrap().is_some());

        session.clear();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn subscribers_observe_sign_out() {
        let session = Session::restore(MemoryStorage::new());
        let mut changes = session.subscribe();

        session.establish(alice(), "at1".into(), "rt1".into());
        assert!(changes.has_changed().unwrap());
        assert!(changes.borrow_and_update().is_authenticated());

        session.clear();
        assert!(changes.has_changed().unwrap());
        assert!(!changes.borrow_and_update().is_authenticated());
    }

    #[test]
    fn generation_bumps_on_every_mutation() {
        let session = Session::restore(MemoryStorage::new());
        let start = session.token_generation();
        session.establish(alice(), "at1".into(), "rt1".into());
        session.set_access_token("at2".into());
        assert_eq!(session.token_generation(), start + 2);
    }
}
