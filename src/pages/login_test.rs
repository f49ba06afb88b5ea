use super::*;

#[test]
fn validate_login_trims_username_and_requires_both_fields() {
    assert_eq!(
        validate_login("  alice ", "secret"),
        Ok(Credentials { username: "alice".to_owned(), password: "secret".to_owned() })
    );
    assert_eq!(validate_login("   ", "secret"), Err("Enter both username and password."));
    assert_eq!(validate_login("alice", ""), Err("Enter both username and password."));
}

#[test]
fn validate_login_keeps_password_whitespace() {
    let credentials = validate_login("alice", " pass ").unwrap();
    assert_eq!(credentials.password, " pass ");
}

#[test]
fn validate_registration_checks_lengths() {
    assert_eq!(validate_registration("", "secret", "secret"), Err("Username is required"));
    assert_eq!(validate_registration("al", "secret", "secret"), Err("Username must be at least 3 characters"));
    assert_eq!(validate_registration("alice", "", ""), Err("Password is required"));
    assert_eq!(validate_registration("alice", "12345", "12345"), Err("Password must be at least 6 characters"));
}

#[test]
fn validate_registration_requires_matching_confirmation() {
    assert_eq!(validate_registration("alice", "secret", ""), Err("Please confirm your password"));
    assert_eq!(validate_registration("alice", "secret", "secreT"), Err("Passwords do not match"));
    assert!(validate_registration("alice", "secret", "secret").is_ok());
}
