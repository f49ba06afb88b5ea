use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_set_then_get_returns_value() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k"), Some("v".to_owned()));
}

#[test]
fn memory_store_remove_missing_key_is_noop() {
    let store = MemoryStore::new();
    store.remove("missing");
    assert!(store.is_empty());
}

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set("k", "v").unwrap();
    assert_eq!(other.peek("k"), Some("v".to_owned()));
    assert_eq!(other.len(), 1);
}

#[test]
fn memory_store_counts_trait_accesses_only() {
    let store = MemoryStore::new();
    store.seed("k", "v");
    let _ = store.peek("k");
    assert_eq!(store.accesses(), 0);

    let _ = store.get("k");
    store.set("k", "w").unwrap();
    store.remove("k");
    assert_eq!(store.accesses(), 3);
}

#[test]
fn memory_store_rejected_write_leaves_previous_value() {
    let store = MemoryStore::new();
    store.seed("k", "old");
    store.reject_writes(true);
    assert_eq!(
        store.set("k", "new"),
        Err(StoreError::WriteRejected { key: "k".to_owned() })
    );
    assert_eq!(store.peek("k"), Some("old".to_owned()));
}

// =============================================================
// BrowserStorage outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_empty_and_accepts_writes_off_browser() {
    let store = BrowserStorage;
    assert_eq!(store.set("k", "v"), Ok(()));
    assert_eq!(store.get("k"), None);
    store.remove("k");
}

#[test]
fn store_error_messages_name_the_key() {
    let err = StoreError::WriteRejected { key: "searchPageState".to_owned() };
    assert_eq!(err.to_string(), "storage rejected write for key searchPageState");
    assert_eq!(StoreError::Unavailable.to_string(), "storage unavailable");
}
