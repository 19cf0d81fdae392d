//! Auth Store - Session state and the cached user record
//!
//! Holds the signed-in user as reactive state and persists a single
//! serialized user record when the caller asks to be remembered.
//!
//! # Storage scopes
//!
//! - **Session**: the user lives only in the store's signal and is gone
//!   when the process exits (`remember = false`)
//! - **Persistent**: the user record is additionally written as JSON to
//!   the store's path and restored on the next start (`remember = true`)
//!
//! # Example
//!
//! ```ignore
//! use stockscan::state::auth::{AuthStore, User};
//!
//! let mut store = AuthStore::new("auth_user.json");
//! store.restore()?; // Pick up a remembered user, if any
//!
//! if !store.is_authenticated() {
//!     store.login(user, true)?; // Remember across restarts
//! }
//!
//! store.logout()?; // Clears the signal and the persisted record
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spark_signals::{signal, Signal};

// =============================================================================
// USER RECORD
// =============================================================================

/// The cached user record. Exactly one exists per store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    /// Bearer token handed back by the login endpoint.
    pub token: String,
}

// =============================================================================
// AUTH STORE
// =============================================================================

/// Reactive session store with an optional persisted user record.
pub struct AuthStore {
    user: Signal<Option<User>>,
    is_loading: Signal<bool>,
    /// Where the remembered record is written.
    persist_path: PathBuf,
}

impl AuthStore {
    /// Create a store that persists remembered users at `persist_path`.
    pub fn new(persist_path: impl Into<PathBuf>) -> Self {
        Self {
            user: signal(None),
            is_loading: signal(false),
            persist_path: persist_path.into(),
        }
    }

    // =========================================================================
    // OBSERVABLE STATE
    // =========================================================================

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    /// Signal holding the signed-in user.
    pub fn user_signal(&self) -> Signal<Option<User>> {
        self.user.clone()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.get().is_some()
    }

    /// Whether a login/restore is in flight. Hosts toggle this around
    /// their network call and read it for spinners.
    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Mark a login/restore as started or finished.
    pub fn set_loading(&self, loading: bool) {
        self.is_loading.set(loading);
    }

    // =========================================================================
    // SESSION TRANSITIONS
    // =========================================================================

    /// Sign in. With `remember`, the record is also written to the
    /// persistent scope so [`restore`](Self::restore) finds it later;
    /// without, any previously remembered record is dropped.
    pub fn login(&mut self, user: User, remember: bool) -> io::Result<()> {
        if remember {
            let json = serde_json::to_string(&user)?;
            fs::write(&self.persist_path, json)?;
        } else {
            self.remove_persisted()?;
        }
        self.user.set(Some(user));
        self.is_loading.set(false);
        Ok(())
    }

    /// Sign out: clears the signal and removes the persisted record.
    pub fn logout(&mut self) -> io::Result<()> {
        self.user.set(None);
        self.remove_persisted()
    }

    /// Load a remembered user record, if one exists. Returns the
    /// restored user. A missing file is not an error; a corrupt record
    /// is discarded and removed.
    pub fn restore(&mut self) -> io::Result<Option<User>> {
        let json = match fs::read_to_string(&self.persist_path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<User>(&json) {
            Ok(user) => {
                self.user.set(Some(user.clone()));
                Ok(Some(user))
            }
            Err(_) => {
                self.remove_persisted()?;
                Ok(None)
            }
        }
    }

    fn remove_persisted(&self) -> io::Result<()> {
        match fs::remove_file(&self.persist_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
