//! Auth token storage, claim decoding, and route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API issues a JWT on login. The client keeps it under `token` in the
//! persistent store, attaches it to every request, and reads the user's
//! identity straight from its (unverified) claims.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use serde::Deserialize;

use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::util::storage::{KeyValueStore, StoreError};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Why a token could not be turned into a [`User`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not base64url")]
    Encoding,
    #[error("token payload is not valid claims JSON: {0}")]
    Claims(String),
    #[error("token has no subject")]
    MissingSubject,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<i64>,
    email: Option<String>,
    roles: Option<Vec<String>>,
}

pub fn stored_token(store: &dyn KeyValueStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// # Errors
///
/// Propagates the store's write failure.
pub fn store_token(store: &dyn KeyValueStore, token: &str) -> Result<(), StoreError> {
    store.set(TOKEN_KEY, token)
}

pub fn clear_token(store: &dyn KeyValueStore) {
    store.remove(TOKEN_KEY);
}

/// Decode the user identity carried in a JWT payload. The signature is not
/// checked; the server does that on every request.
///
/// # Errors
///
/// Returns a [`TokenError`] when the token is not three dot-separated parts,
/// the payload is not base64url JSON, or there is no `sub` claim.
pub fn decode_user(token: &str) -> Result<User, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))?;
    let username = claims.sub.filter(|s| !s.is_empty()).ok_or(TokenError::MissingSubject)?;

    Ok(User {
        id: claims.user_id.unwrap_or(1),
        email: claims.email.unwrap_or_else(|| format!("{username}@example.com")),
        roles: claims.roles.unwrap_or_else(|| vec!["ROLE_USER".to_owned()]),
        username,
        preferences: None,
        profile_info: None,
        bio: None,
        avatar: None,
    })
}

/// Restore the signed-in user from a stored token. A token that cannot be
/// decoded is removed.
pub fn restore_session(store: &dyn KeyValueStore) -> Option<User> {
    let token = stored_token(store)?;
    match decode_user(&token) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("discarding stored token: {err}");
            clear_token(store);
            None
        }
    }
}

/// The API rejected our token: forget it and send the user to `/login`.
pub fn handle_unauthorized(store: &dyn KeyValueStore) {
    clear_token(store);
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
}

pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
