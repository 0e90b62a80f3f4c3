// ABOUTME: Session facade holding the current credential and signed-in role
// ABOUTME: Clears expired or malformed credentials and notifies listeners on sign-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Session state shared by the transport and the record cache
//!
//! The session is an explicit context object: construct one, wrap it in an
//! `Arc`, and hand it to the transport. Absence of a valid credential is a
//! normal state, so none of these operations fail.

/// Bearer token inspection
pub mod token;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vitaltrack_core::constants::session::ADMIN_ROLE_ID;

pub use token::TokenState;

/// Role granted by the server at sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user
    User,
    /// Administrator
    Admin,
}

impl Role {
    /// Map the server's numeric role identifier
    #[must_use]
    pub const fn from_role_id(role_id: i64) -> Self {
        if role_id == ADMIN_ROLE_ID {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Bearer token and the role it was issued for
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    role: Role,
}

impl Credential {
    /// Pair a token with its role
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    /// Raw bearer token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Granted role
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Result of validating the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// A usable credential is installed
    SignedIn(Role),
    /// No credential, or the last one was cleared
    SignedOut,
}

/// Receives a callback whenever the credential is cleared
pub trait SessionListener: Send + Sync {
    /// Called after the credential has been removed
    fn on_signed_out(&self);
}

/// Holder of the current credential
#[derive(Default)]
pub struct Session {
    credential: RwLock<Option<Credential>>,
    listeners: RwLock<Vec<Weak<dyn SessionListener>>>,
}

impl Session {
    /// Empty, signed-out session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-populated with a user-role token, if one is given
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        let session = Self::new();
        if let Some(token) = token {
            session.sign_in(token, Role::User);
        }
        session
    }

    /// Register a listener; it is held weakly and dropped once its owner is gone
    pub fn subscribe<L>(&self, listener: &Arc<L>)
    where
        L: SessionListener + 'static,
    {
        let listener: Arc<dyn SessionListener> = listener.clone();
        self.write_listeners().push(Arc::downgrade(&listener));
    }

    /// Install a credential, replacing any previous one
    pub fn sign_in(&self, token: impl Into<String>, role: Role) {
        *self.write_credential() = Some(Credential::new(token, role));
        info!(?role, "Session signed in");
    }

    /// Remove the credential and notify listeners
    pub fn sign_out(&self) {
        let previous = self.write_credential().take();
        if previous.is_some() {
            info!("Session signed out");
            self.notify_signed_out();
        }
    }

    /// Current credential, clearing it first if it is expired or malformed
    #[must_use]
    pub fn current_credential(&self) -> Option<Credential> {
        let credential = self.read_credential().clone()?;
        match token::inspect(credential.token(), Utc::now().timestamp()) {
            TokenState::Valid => Some(credential),
            state => {
                warn!(?state, "Discarding unusable credential");
                self.clear_if_current(&credential);
                None
            }
        }
    }

    /// Validate the credential and report the resulting state
    #[must_use]
    pub fn validate(&self) -> SessionStatus {
        self.current_credential()
            .map_or(SessionStatus::SignedOut, |c| SessionStatus::SignedIn(c.role()))
    }

    /// True when a valid credential is installed
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_credential().is_some()
    }

    /// True when a valid administrator credential is installed
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_credential()
            .is_some_and(|c| c.role() == Role::Admin)
    }

    fn clear_if_current(&self, stale: &Credential) {
        let cleared = {
            let mut slot = self.write_credential();
            if slot.as_ref() == Some(stale) {
                *slot = None;
                true
            } else {
                false
            }
        };
        if cleared {
            self.notify_signed_out();
        }
    }

    fn notify_signed_out(&self) {
        let live: Vec<Arc<dyn SessionListener>> = {
            let mut listeners = self.write_listeners();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener.on_signed_out();
        }
    }

    fn read_credential(&self) -> RwLockReadGuard<'_, Option<Credential>> {
        self.credential.read().unwrap_or_else(|poisoned| {
            warn!("Session credential lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_credential(&self) -> RwLockWriteGuard<'_, Option<Credential>> {
        self.credential.write().unwrap_or_else(|poisoned| {
            warn!("Session credential lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_listeners(&self) -> RwLockWriteGuard<'_, Vec<Weak<dyn SessionListener>>> {
        self.listeners.write().unwrap_or_else(|poisoned| {
            warn!("Session listener lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}
