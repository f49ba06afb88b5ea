use super::*;

fn user_with_roles(roles: &[&str]) -> User {
    User {
        id: 1,
        username: "mod".to_owned(),
        email: "mod@example.com".to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        preferences: None,
        profile_info: None,
        bio: None,
        avatar: None,
    }
}

#[test]
fn validate_message_trims_and_rejects_blank() {
    assert_eq!(validate_message("   \n"), None);
    assert_eq!(
        validate_message("  hello  "),
        Some(CreateMessageRequest { content: "hello".to_owned(), parent_message_id: None })
    );
}

#[test]
fn is_moderator_accepts_moderator_and_admin_roles() {
    assert!(!is_moderator(&user_with_roles(&["ROLE_USER"])));
    assert!(is_moderator(&user_with_roles(&["ROLE_USER", "ROLE_MODERATOR"])));
    assert!(is_moderator(&user_with_roles(&["ROLE_ADMIN"])));
}

#[test]
fn message_time_extracts_hours_and_minutes() {
    assert_eq!(message_time("2024-05-01T18:42:07.123"), "18:42");
    assert_eq!(message_time("today"), "today");
}
