//! Client-side session state for Taskboard.
//!
//! The active session lives in a signal provided through context and is
//! persisted to LocalStorage so a reload keeps the user signed in. Reading
//! the session through this handle subscribes the reader to session changes,
//! which is how the rest of the app observes sign-in and sign-out.

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};

use crate::supabase::{Identity, Session};

const STORAGE_KEY: &str = "taskboard_session";

/// Handle to the current session. Copy, so components can freely capture it
/// in event handlers.
#[derive(Clone, Copy)]
pub struct SessionStore {
    inner: Signal<Option<Session>>,
}

impl SessionStore {
    /// Restores the persisted session, if any. Must run inside a component
    /// scope because it creates the backing signal.
    pub fn restore() -> Self {
        Self {
            inner: Signal::new(LocalStorage::get::<Session>(STORAGE_KEY).ok()),
        }
    }

    /// The current session, if one is active.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    /// The identity owning the current session, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.inner.read().as_ref().map(|s| s.user.clone())
    }

    /// Stores a freshly issued session and notifies subscribers.
    pub fn set(&mut self, session: Session) {
        let _ = LocalStorage::set(STORAGE_KEY, &session);
        self.inner.set(Some(session));
    }

    /// Ends the local session. Subscribers observe the change and reset
    /// their own state; nothing is cleared directly here.
    pub fn clear(&mut self) {
        LocalStorage::delete(STORAGE_KEY);
        self.inner.set(None);
    }
}

/// Convenience hook for the session store provided at the app root.
pub fn use_session_store() -> SessionStore {
    use_context::<SessionStore>()
}
