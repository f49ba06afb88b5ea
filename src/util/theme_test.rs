use super::*;
use crate::util::storage::MemoryStore;

#[test]
fn read_preference_defaults_to_dark() {
    assert_eq!(read_preference(&MemoryStore::new()), ThemeMode::Dark);
}

#[test]
fn read_preference_ignores_unknown_value() {
    let store = MemoryStore::new();
    store.seed(THEME_KEY, "sepia");
    assert_eq!(read_preference(&store), ThemeMode::Dark);
}

#[test]
fn read_preference_returns_saved_light() {
    let store = MemoryStore::new();
    store.seed(THEME_KEY, "light");
    assert_eq!(read_preference(&store), ThemeMode::Light);
}

#[test]
fn toggle_flips_and_persists() {
    let store = MemoryStore::new();
    assert_eq!(toggle(&store, ThemeMode::Dark), ThemeMode::Light);
    assert_eq!(store.peek(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(toggle(&store, ThemeMode::Light), ThemeMode::Dark);
    assert_eq!(store.peek(THEME_KEY).as_deref(), Some("dark"));
}

#[test]
fn set_preference_survives_rejected_write() {
    let store = MemoryStore::new();
    store.reject_writes(true);
    set_preference(&store, ThemeMode::Light);
    assert_eq!(store.peek(THEME_KEY), None);
}

#[test]
fn parse_round_trips_as_str() {
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        assert_eq!(ThemeMode::parse(mode.as_str()), Some(mode));
    }
    assert!(ThemeMode::Dark.is_dark());
    assert!(!ThemeMode::Light.is_dark());
}
