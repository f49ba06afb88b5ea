//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::util::auth::{clear_token, decode_user, restore_session, store_token, TokenError};
use crate::util::storage::{KeyValueStore, StoreError};

/// Why a sign-in attempt could not be completed locally.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("invalid token received from server: {0}")]
    Token(#[from] TokenError),
    #[error("could not save session: {0}")]
    Store(#[from] StoreError),
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before the stored session has been examined.
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    /// State after examining the stored session.
    pub fn restored(store: &dyn KeyValueStore) -> Self {
        Self { user: restore_session(store), loading: false }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Persist a freshly issued token and decode the user it names. A token that
/// does not decode is not kept.
///
/// # Errors
///
/// Returns [`SignInError::Token`] for an undecodable token and
/// [`SignInError::Store`] if the token could not be saved.
pub fn sign_in(store: &dyn KeyValueStore, token: &str) -> Result<User, SignInError> {
    let user = decode_user(token)?;
    store_token(store, token)?;
    Ok(user)
}

pub fn sign_out(store: &dyn KeyValueStore) {
    clear_token(store);
}
