use super::*;
use crate::util::auth::TOKEN_KEY;
use crate::util::storage::MemoryStore;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

fn token_for(claims: &serde_json::Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

#[test]
fn pending_state_is_loading_without_user() {
    let state = AuthState::pending();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn sign_in_stores_token_and_returns_user() {
    let store = MemoryStore::new();
    let token = token_for(&serde_json::json!({ "sub": "sam", "userId": 4 }));

    let user = sign_in(&store, &token).unwrap();
    assert_eq!(user.username, "sam");
    assert_eq!(user.id, 4);
    assert_eq!(store.peek(TOKEN_KEY), Some(token));
}

#[test]
fn sign_in_with_bad_token_stores_nothing() {
    let store = MemoryStore::new();
    let err = sign_in(&store, "garbage").unwrap_err();
    assert_eq!(err, SignInError::Token(TokenError::Malformed));
    assert!(store.is_empty());
}

#[test]
fn sign_in_reports_store_failure() {
    let store = MemoryStore::new();
    store.reject_writes(true);
    let token = token_for(&serde_json::json!({ "sub": "sam" }));
    assert!(matches!(sign_in(&store, &token), Err(SignInError::Store(_))));
}

#[test]
fn restored_state_reads_stored_token() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, &token_for(&serde_json::json!({ "sub": "kim" })));

    let state = AuthState::restored(&store);
    assert!(!state.loading);
    assert_eq!(state.user.unwrap().username, "kim");
}

#[test]
fn sign_out_removes_token() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, "t");
    sign_out(&store);
    assert_eq!(store.peek(TOKEN_KEY), None);
}
