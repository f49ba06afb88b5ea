//! Durable string-keyed storage behind a narrow trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page state, the auth token, and the theme preference all persist through
//! `KeyValueStore`. `BrowserStorage` wraps `localStorage` in hydrate builds and
//! no-ops elsewhere so server rendering stays deterministic; `MemoryStore`
//! stands in for the browser in tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Failure to write an entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No storage backend is reachable (private mode, storage disabled).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the write, typically because the quota is exhausted.
    #[error("storage rejected write for key {key}")]
    WriteRejected { key: String },
}

/// Minimal durable key-value capability.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend is missing or rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str);
}

/// Browser `localStorage` for the current origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StoreError::WriteRejected { key: key.to_owned() })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory store. Clones share the same entries.
///
/// Counts every `get`/`set`/`remove` so callers can assert that a code path
/// never touched storage, and can be told to reject writes to simulate a full
/// quota.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    accesses: usize,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at an entry without counting it as an access.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Seed an entry without counting it as an access.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner.borrow_mut().entries.insert(key.to_owned(), value.to_owned());
    }

    /// Number of trait calls made against this store.
    pub fn accesses(&self) -> usize {
        self.inner.borrow().accesses
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Make subsequent `set` calls fail with [`StoreError::WriteRejected`].
    pub fn reject_writes(&self, reject: bool) {
        self.inner.borrow_mut().reject_writes = reject;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        inner.accesses += 1;
        inner.entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.accesses += 1;
        if inner.reject_writes {
            return Err(StoreError::WriteRejected { key: key.to_owned() });
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.accesses += 1;
        inner.entries.remove(key);
    }
}
