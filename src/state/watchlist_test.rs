use super::*;
use crate::net::types::Content;

fn entry(id: i64, status: WatchlistStatus, added_at: &str, content: Option<(&str, ContentType, Option<f64>)>) -> WatchlistItem {
    WatchlistItem {
        id,
        user_id: 1,
        content_id: id * 10,
        content: content.map(|(title, content_type, ratings)| Content {
            id: id * 10,
            title: title.to_owned(),
            content_type,
            ratings,
            ..Content::default()
        }),
        status,
        added_at: added_at.to_owned(),
    }
}

fn watchlist() -> Vec<WatchlistItem> {
    vec![
        entry(1, WatchlistStatus::Watchlist, "2024-03-01T10:00:00", Some(("Dune", ContentType::Movie, Some(8.0)))),
        entry(2, WatchlistStatus::Watched, "2024-05-01T10:00:00", Some(("Arcane", ContentType::Series, Some(9.0)))),
        entry(3, WatchlistStatus::InProgress, "2024-01-01T10:00:00", None),
        entry(4, WatchlistStatus::Watchlist, "2024-04-01T10:00:00", Some(("Akira", ContentType::Anime, None))),
    ]
}

fn ids(items: &[WatchlistItem]) -> Vec<i64> {
    items.iter().map(|item| item.id).collect()
}

// =============================================================
// Filtering
// =============================================================

#[test]
fn default_state_shows_everything_newest_first() {
    let state = WatchlistPageState::default();
    assert_eq!(state.status(), None);
    assert_eq!(ids(&state.visible(&watchlist())), vec![2, 4, 1, 3]);
}

#[test]
fn status_tab_filters_by_status() {
    let state = WatchlistPageState { status_filter: 1, ..WatchlistPageState::default() };
    assert_eq!(ids(&state.visible(&watchlist())), vec![4, 1]);
    let state = WatchlistPageState { status_filter: 2, ..WatchlistPageState::default() };
    assert_eq!(ids(&state.visible(&watchlist())), vec![3]);
    let state = WatchlistPageState { status_filter: 3, ..WatchlistPageState::default() };
    assert_eq!(ids(&state.visible(&watchlist())), vec![2]);
}

#[test]
fn unknown_tab_index_shows_all() {
    let state = WatchlistPageState { status_filter: 9, ..WatchlistPageState::default() };
    assert_eq!(state.visible(&watchlist()).len(), 4);
}

#[test]
fn type_filter_excludes_entries_without_content() {
    let state = WatchlistPageState {
        content_type_filter: TypeFilter::Only(ContentType::Anime),
        ..WatchlistPageState::default()
    };
    assert_eq!(ids(&state.visible(&watchlist())), vec![4]);
}

#[test]
fn tab_counts_cover_each_status() {
    assert_eq!(tab_counts(&watchlist()), [4, 2, 1, 1]);
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn title_sort_falls_back_to_content_id() {
    let mut items = watchlist();
    sort_watchlist(&mut items, "title");
    assert_eq!(ids(&items), vec![4, 2, 3, 1]);
    assert_eq!(display_title(&items[2]), "Content 30");
}

#[test]
fn rating_sort_puts_unrated_last() {
    let mut items = watchlist();
    sort_watchlist(&mut items, "rating");
    assert_eq!(ids(&items), vec![2, 1, 3, 4]);
}

#[test]
fn unknown_sort_keeps_order() {
    let mut items = watchlist();
    sort_watchlist(&mut items, "random");
    assert_eq!(ids(&items), vec![1, 2, 3, 4]);
}

// =============================================================
// Persisted shape
// =============================================================

#[test]
fn type_filter_persists_as_string() {
    let state = WatchlistPageState::default();
    assert_eq!(
        serde_json::to_value(&state).unwrap(),
        serde_json::json!({ "statusFilter": 0, "contentTypeFilter": "ALL", "sortBy": "addedAt" })
    );
    let restored: WatchlistPageState =
        serde_json::from_str(r#"{"statusFilter":2,"contentTypeFilter":"SERIES","sortBy":"title"}"#).unwrap();
    assert_eq!(restored.content_type_filter, TypeFilter::Only(ContentType::Series));
}

#[test]
fn type_filter_rejects_unknown_value() {
    assert!(serde_json::from_str::<TypeFilter>(r#""PODCAST""#).is_err());
    assert_eq!(TypeFilter::parse("ALL"), Some(TypeFilter::All));
}
