use super::*;

fn item(id: i64, title: &str, date: Option<&str>, rating: Option<f64>, genres: &[&str]) -> Content {
    Content {
        id,
        title: title.to_owned(),
        release_date: date.map(str::to_owned),
        ratings: rating,
        genre_names: genres.iter().map(|g| (*g).to_owned()).collect(),
        ..Content::default()
    }
}

fn catalogue() -> Vec<Content> {
    vec![
        item(1, "Dune", Some("2021-10-22"), Some(8.0), &["Sci-Fi", "Drama"]),
        item(2, "alien", Some("1979-05-25"), Some(8.5), &["Horror", "Sci-Fi"]),
        item(3, "Clue", Some("1985-12-13"), None, &["Comedy"]),
        item(4, "Brick", None, Some(7.0), &["Drama"]),
    ]
}

fn ids(items: &[Content]) -> Vec<i64> {
    items.iter().map(|c| c.id).collect()
}

// =============================================================
// State transitions
// =============================================================

#[test]
fn default_state_matches_first_visit() {
    let state = ContentPageState::default();
    assert_eq!(state.content_type, ContentType::Movie);
    assert_eq!(state.sort_by, "title-asc");
    assert_eq!(state.current_page, 1);
    assert!(!state.has_active_filters());
}

#[test]
fn select_content_type_resets_filters_and_page() {
    let mut state = ContentPageState {
        selected_genre: "Drama".to_owned(),
        selected_year: "2021".to_owned(),
        min_rating: 5.0,
        sort_by: "rating-desc".to_owned(),
        current_page: 4,
        ..ContentPageState::default()
    };
    state.select_content_type(ContentType::Anime);
    assert_eq!(state, ContentPageState { content_type: ContentType::Anime, ..ContentPageState::default() });
}

#[test]
fn reset_filters_keeps_content_type() {
    let mut state = ContentPageState {
        content_type: ContentType::Series,
        selected_genre: "Drama".to_owned(),
        current_page: 3,
        ..ContentPageState::default()
    };
    state.reset_filters();
    assert_eq!(state.content_type, ContentType::Series);
    assert!(state.selected_genre.is_empty());
    assert_eq!(state.current_page, 1);
}

// =============================================================
// Options and filtering
// =============================================================

#[test]
fn genre_options_are_distinct_and_sorted() {
    assert_eq!(genre_options(&catalogue()), vec!["Comedy", "Drama", "Horror", "Sci-Fi"]);
}

#[test]
fn year_options_are_newest_first_and_skip_missing_dates() {
    assert_eq!(year_options(&catalogue()), vec![2021, 1985, 1979]);
}

#[test]
fn filter_by_genre_and_year() {
    let state = ContentPageState { selected_genre: "Sci-Fi".to_owned(), ..ContentPageState::default() };
    assert_eq!(ids(&state.visible(&catalogue())), vec![2, 1]);

    let state = ContentPageState { selected_year: "1985".to_owned(), ..ContentPageState::default() };
    assert_eq!(ids(&state.visible(&catalogue())), vec![3]);
}

#[test]
fn every_offered_genre_and_year_selects_some_title() {
    let items = catalogue();
    for genre in genre_options(&items) {
        let state = ContentPageState { selected_genre: genre.clone(), ..ContentPageState::default() };
        assert!(!state.visible(&items).is_empty(), "genre {genre} matched nothing");
    }
    for year in year_options(&items) {
        let state = ContentPageState { selected_year: year.to_string(), ..ContentPageState::default() };
        assert!(!state.visible(&items).is_empty(), "year {year} matched nothing");
    }
}

#[test]
fn unrated_items_pass_rating_filter() {
    let state = ContentPageState { min_rating: 8.0, ..ContentPageState::default() };
    assert_eq!(ids(&state.visible(&catalogue())), vec![2, 3, 1]);
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn sort_by_title_ignores_case() {
    let mut items = catalogue();
    sort_content(&mut items, "title-asc");
    assert_eq!(ids(&items), vec![2, 4, 3, 1]);
    sort_content(&mut items, "title-desc");
    assert_eq!(ids(&items), vec![1, 3, 4, 2]);
}

#[test]
fn sort_by_year_treats_missing_as_zero() {
    let mut items = catalogue();
    sort_content(&mut items, "year-asc");
    assert_eq!(ids(&items), vec![4, 2, 3, 1]);
    sort_content(&mut items, "year-desc");
    assert_eq!(ids(&items), vec![1, 3, 2, 4]);
}

#[test]
fn sort_by_rating_treats_missing_as_zero() {
    let mut items = catalogue();
    sort_content(&mut items, "rating-desc");
    assert_eq!(ids(&items), vec![2, 1, 4, 3]);
    sort_content(&mut items, "rating-asc");
    assert_eq!(ids(&items), vec![3, 4, 1, 2]);
}

#[test]
fn unknown_sort_keeps_order() {
    let mut items = catalogue();
    sort_content(&mut items, "popularity");
    assert_eq!(ids(&items), vec![1, 2, 3, 4]);
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0), 0);
    assert_eq!(total_pages(1), 1);
    assert_eq!(total_pages(40), 1);
    assert_eq!(total_pages(41), 2);
}

#[test]
fn paginate_returns_requested_window() {
    let items: Vec<Content> = (0..85).map(|i| item(i, &format!("t{i}"), None, None, &[])).collect();
    assert_eq!(paginate(&items, 1).len(), 40);
    assert_eq!(paginate(&items, 3).len(), 5);
    assert_eq!(paginate(&items, 3)[0].id, 80);
    assert!(paginate(&items, 4).is_empty());
    assert_eq!(paginate(&items, 0)[0].id, 0);
}
