use super::*;

fn channel(id: i64, name: &str, members: i64, created_at: &str, created_by_id: i64, joined: bool) -> Channel {
    Channel {
        id,
        name: name.to_owned(),
        description: String::new(),
        created_at: created_at.to_owned(),
        created_by_id,
        created_by_username: format!("user{created_by_id}"),
        member_count: members,
        joined,
    }
}

fn directory() -> Vec<Channel> {
    vec![
        channel(1, "sci-fi", 12, "2024-02-01T00:00:00", 7, true),
        channel(2, "Anime Club", 30, "2024-01-01T00:00:00", 8, false),
        channel(3, "horror", 5, "2024-03-01T00:00:00", 7, false),
    ]
}

fn ids(channels: &[Channel]) -> Vec<i64> {
    channels.iter().map(|c| c.id).collect()
}

// =============================================================
// Tabs
// =============================================================

#[test]
fn joined_tab_uses_membership_flag() {
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::Joined, "name-asc", Some(8))), vec![1]);
}

#[test]
fn created_tab_matches_current_user() {
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::Created, "name-asc", Some(7))), vec![3, 1]);
    assert!(visible_channels(&directory(), ChannelTab::Created, "name-asc", None).is_empty());
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn sort_by_name_ignores_case() {
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "name-asc", None)), vec![2, 3, 1]);
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "name-desc", None)), vec![1, 3, 2]);
}

#[test]
fn sort_by_members_and_date() {
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "members-desc", None)), vec![2, 1, 3]);
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "members-asc", None)), vec![3, 1, 2]);
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "date-desc", None)), vec![3, 1, 2]);
    assert_eq!(ids(&visible_channels(&directory(), ChannelTab::All, "date-asc", None)), vec![2, 1, 3]);
}

// =============================================================
// Create form
// =============================================================

#[test]
fn validate_new_channel_trims_and_requires_both_fields() {
    assert_eq!(
        validate_new_channel("  noir ", " black and white "),
        Ok(CreateChannelRequest { name: "noir".to_owned(), description: "black and white".to_owned() })
    );
    assert_eq!(validate_new_channel("noir", "  "), Err("Enter a name and a description."));
    assert_eq!(validate_new_channel("", "about"), Err("Enter a name and a description."));
}
