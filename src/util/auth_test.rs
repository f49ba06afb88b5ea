use super::*;
use base64::Engine as _;
use crate::util::storage::MemoryStore;

fn token_for(claims: &serde_json::Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature")
}

// =============================================================
// decode_user
// =============================================================

#[test]
fn decode_user_reads_standard_claims() {
    let token = token_for(&serde_json::json!({
        "sub": "alice",
        "userId": 42,
        "email": "alice@discover.app",
        "roles": ["ROLE_USER", "ROLE_MODERATOR"]
    }));
    let user = decode_user(&token).unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@discover.app");
    assert_eq!(user.roles, vec!["ROLE_USER", "ROLE_MODERATOR"]);
}

#[test]
fn decode_user_fills_defaults_for_missing_claims() {
    let user = decode_user(&token_for(&serde_json::json!({ "sub": "bob" }))).unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "bob@example.com");
    assert_eq!(user.roles, vec!["ROLE_USER"]);
}

#[test]
fn decode_user_tolerates_padded_payload() {
    let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"sub":"ali"}"#);
    assert!(payload.ends_with('='));
    let user = decode_user(&format!("h.{payload}.s")).unwrap();
    assert_eq!(user.username, "ali");
}

#[test]
fn decode_user_rejects_wrong_part_count() {
    assert_eq!(decode_user("only.two"), Err(TokenError::Malformed));
    assert_eq!(decode_user("a.b.c.d"), Err(TokenError::Malformed));
}

#[test]
fn decode_user_rejects_bad_base64() {
    assert_eq!(decode_user("h.!!!.s"), Err(TokenError::Encoding));
}

#[test]
fn decode_user_rejects_non_json_payload() {
    let payload = URL_SAFE_NO_PAD.encode(b"not json");
    assert!(matches!(decode_user(&format!("h.{payload}.s")), Err(TokenError::Claims(_))));
}

#[test]
fn decode_user_requires_subject() {
    let token = token_for(&serde_json::json!({ "userId": 3 }));
    assert_eq!(decode_user(&token), Err(TokenError::MissingSubject));
}

// =============================================================
// Token storage
// =============================================================

#[test]
fn restore_session_returns_user_for_valid_token() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, &token_for(&serde_json::json!({ "sub": "carol" })));
    assert_eq!(restore_session(&store).unwrap().username, "carol");
    assert!(store.peek(TOKEN_KEY).is_some());
}

#[test]
fn restore_session_discards_invalid_token() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, "not-a-jwt");
    assert_eq!(restore_session(&store), None);
    assert_eq!(store.peek(TOKEN_KEY), None);
}

#[test]
fn stored_token_ignores_empty_value() {
    let store = MemoryStore::new();
    store.seed(TOKEN_KEY, "");
    assert_eq!(stored_token(&store), None);
}

#[test]
fn handle_unauthorized_clears_token() {
    let store = MemoryStore::new();
    store_token(&store, "abc").unwrap();
    handle_unauthorized(&store);
    assert_eq!(stored_token(&store), None);
}

// =============================================================
// Route guard
// =============================================================

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::pending()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let user = decode_user(&token_for(&serde_json::json!({ "sub": "dan" }))).unwrap();
    let state = AuthState { user: Some(user), loading: false };
    assert!(!should_redirect_unauth(&state));
}
