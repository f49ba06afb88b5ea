use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::state::page_state::PageStateContainer;
use crate::util::storage::MemoryStore;
use crate::util::timer::ManualScheduler;

#[test]
fn index_maps_to_catalogue_in_tab_order() {
    let types: Vec<ContentType> =
        (0..3).map(|i| HomePageState { content_type_index: i }.content_type()).collect();
    assert_eq!(types, ContentType::ALL.to_vec());
}

#[test]
fn out_of_range_index_falls_back_to_movies() {
    assert_eq!(HomePageState { content_type_index: 7 }.content_type(), ContentType::Movie);
}

#[test]
fn select_stores_tab_position() {
    let mut state = HomePageState::default();
    state.select(ContentType::Anime);
    assert_eq!(state.content_type_index, 2);
    state.select(ContentType::Movie);
    assert_eq!(state.content_type_index, 0);
}

#[test]
fn persisted_shape_is_camel_case() {
    let value = serde_json::to_value(HomePageState { content_type_index: 1 }).unwrap();
    assert_eq!(value, serde_json::json!({ "contentTypeIndex": 1 }));
}

// =============================================================
// Persisted tab selection
// =============================================================

#[test]
fn tab_choice_survives_remount_then_resets_after_two_idle_minutes() {
    let store = MemoryStore::new();
    let clock = ManualScheduler::new();
    let first = PageStateContainer::new(home_page_options(), Rc::new(store.clone()), Rc::new(clock.clone()));
    first.update_state(|s| s.select(ContentType::Series));
    first.dispose();

    let second = PageStateContainer::new(home_page_options(), Rc::new(store.clone()), Rc::new(clock.clone()));
    assert_eq!(second.state().content_type(), ContentType::Series);

    clock.advance(Duration::from_secs(120));
    assert_eq!(second.state(), HomePageState::default());
    assert_eq!(store.peek(HOME_STATE_KEY), None);
}
