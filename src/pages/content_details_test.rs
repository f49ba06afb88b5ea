use super::*;

fn review(id: i64, rating: i32) -> Review {
    Review {
        id,
        user_id: 1,
        content_id: 42,
        rating,
        review_text: "fine".to_owned(),
        created_at: "2024-05-01T18:42:07".to_owned(),
    }
}

// =============================================================
// Route segments
// =============================================================

#[test]
fn parse_route_accepts_card_links() {
    assert_eq!(parse_route(Some("42"), Some("movie")), Some((42, ContentType::Movie)));
    assert_eq!(parse_route(Some("7"), Some("ANIME")), Some((7, ContentType::Anime)));
    assert_eq!(parse_route(Some("9"), Some("Series")), Some((9, ContentType::Series)));
}

#[test]
fn parse_route_defaults_missing_type_to_movie() {
    assert_eq!(parse_route(Some("42"), None), Some((42, ContentType::Movie)));
}

#[test]
fn parse_route_rejects_bad_segments() {
    assert_eq!(parse_route(None, Some("movie")), None);
    assert_eq!(parse_route(Some("tt0111161"), Some("movie")), None);
    assert_eq!(parse_route(Some("42"), Some("podcast")), None);
}

// =============================================================
// Review form
// =============================================================

#[test]
fn validate_review_trims_text_and_targets_title() {
    assert_eq!(
        validate_review(42, 9, "  loved it \n"),
        Ok(CreateReviewRequest { movie_id: 42, rating: 9, review_text: "loved it".to_owned() })
    );
}

#[test]
fn validate_review_rejects_out_of_range_score() {
    assert!(validate_review(42, 0, "meh").is_err());
    assert!(validate_review(42, 11, "meh").is_err());
    assert!(validate_review(42, 1, "meh").is_ok());
    assert!(validate_review(42, 10, "meh").is_ok());
}

#[test]
fn validate_review_rejects_blank_text() {
    assert_eq!(validate_review(42, 5, "   "), Err("Write a few words about it."));
}

#[test]
fn review_body_uses_movie_id_on_the_wire() {
    let body = serde_json::to_value(validate_review(42, 7, "solid").unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "movieId": 42, "rating": 7, "reviewText": "solid" }));
}

// =============================================================
// Review list
// =============================================================

#[test]
fn average_review_is_mean_score() {
    assert_eq!(average_review(&[]), None);
    assert_eq!(average_review(&[review(1, 8), review(2, 5)]), Some(6.5));
}

#[test]
fn review_date_keeps_calendar_day() {
    assert_eq!(review_date("2024-05-01T18:42:07"), "2024-05-01");
    assert_eq!(review_date("today"), "today");
}
