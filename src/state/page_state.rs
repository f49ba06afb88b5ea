//! Auto-persisting, auto-expiring per-page UI state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page that should survive reloads (content browser, search, AI
//! recommendations, watchlist) owns one `PageStateContainer` under its own
//! storage key. The container never fetches data; pages drive fetches and feed
//! results back through `update_state`.
//!
//! DESIGN
//! ======
//! - Every mutation is written through to the store synchronously.
//! - Loading merges the persisted JSON object over the initial state one
//!   top-level field at a time. Fields the initial shape does not have are
//!   dropped; nested objects are replaced wholesale, never deep-merged.
//! - An inactivity timer resets the state after `auto_reset_minutes` without a
//!   mutation. Re-arming cancels the previous timer first, so at most one
//!   expiry is pending per container.
//!
//! ERROR HANDLING
//! ==============
//! A corrupt persisted entry is a cache miss and a rejected write only costs
//! durability. Both are logged and neither reaches the page.

#[cfg(test)]
#[path = "page_state_test.rs"]
mod page_state_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::util::storage::KeyValueStore;
use crate::util::timer::{Scheduler, TimerHandle};

/// Inactivity timeout applied when a page does not choose one.
pub const DEFAULT_AUTO_RESET_MINUTES: i64 = 2;

/// Failure to apply a structural partial update.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The state type does not serialize to a JSON object.
    #[error("page state is not a JSON object")]
    StateNotAnObject,
    /// The partial update is not a JSON object.
    #[error("partial update is not a JSON object")]
    PartialNotAnObject,
    /// The partial update names a field the state does not have.
    #[error("unknown page state field: {0}")]
    UnknownField(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Construction inputs for a [`PageStateContainer`].
#[derive(Clone, Debug)]
pub struct PageStateOptions<T> {
    /// Storage key, unique across the application.
    pub key: String,
    /// Complete default value; also the value restored on reset.
    pub initial_state: T,
    /// When `false` the container never touches the store and never arms a timer.
    pub persist: bool,
    /// Inactivity timeout in minutes; zero or negative disables auto-reset.
    pub auto_reset_minutes: i64,
}

impl<T> PageStateOptions<T> {
    pub fn new(key: impl Into<String>, initial_state: T) -> Self {
        Self {
            key: key.into(),
            initial_state,
            persist: true,
            auto_reset_minutes: DEFAULT_AUTO_RESET_MINUTES,
        }
    }

    #[must_use]
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    #[must_use]
    pub fn auto_reset_minutes(mut self, minutes: i64) -> Self {
        self.auto_reset_minutes = minutes;
        self
    }

    fn auto_reset_delay(&self) -> Option<Duration> {
        u64::try_from(self.auto_reset_minutes)
            .ok()
            .filter(|minutes| *minutes > 0)
            .map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    key: String,
    initial: T,
    current: T,
    persist: bool,
    auto_reset: Option<Duration>,
    store: Rc<dyn KeyValueStore>,
    scheduler: Rc<dyn Scheduler>,
    pending: Option<TimerHandle>,
    listeners: Vec<Listener<T>>,
}

impl<T: Serialize> Inner<T> {
    fn write(&self) {
        if !self.persist {
            return;
        }
        let raw = match serde_json::to_string(&self.current) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("page state {}: not serializable: {err}", self.key);
                return;
            }
        };
        if let Err(err) = self.store.set(&self.key, &raw) {
            log::warn!("page state {}: {err}; keeping in-memory state only", self.key);
        }
    }

    fn remove_entry(&self) {
        if self.persist {
            self.store.remove(&self.key);
        }
    }
}

/// One page's slice of UI state.
///
/// Cloning yields another handle to the same state. The inactivity timer is
/// cancelled by [`dispose`](Self::dispose) or when the last handle is dropped.
pub struct PageStateContainer<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for PageStateContainer<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T> PageStateContainer<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    /// Build a container, restoring any persisted entry and arming the
    /// inactivity timer.
    pub fn new(options: PageStateOptions<T>, store: Rc<dyn KeyValueStore>, scheduler: Rc<dyn Scheduler>) -> Self {
        let auto_reset = options.auto_reset_delay();
        let PageStateOptions { key, initial_state, persist, .. } = options;

        let persist = if persist && key.trim().is_empty() {
            log::warn!("page state key is empty; persistence disabled");
            false
        } else {
            persist
        };

        let current = if persist {
            load_persisted(store.as_ref(), &key, &initial_state)
        } else {
            initial_state.clone()
        };

        let container = Self {
            inner: Rc::new(RefCell::new(Inner {
                key,
                initial: initial_state,
                current,
                persist,
                auto_reset,
                store,
                scheduler,
                pending: None,
                listeners: Vec::new(),
            })),
        };
        container.rearm();
        container
    }

    pub fn key(&self) -> String {
        self.inner.borrow().key.clone()
    }

    /// Snapshot of the live state.
    pub fn state(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// Whether an inactivity expiry is currently scheduled.
    pub fn is_timer_armed(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Apply a partial update. Fields the closure leaves alone keep their value.
    ///
    /// The closure runs on a copy of the state, so it may read the container.
    pub fn update_state(&self, update: impl FnOnce(&mut T)) {
        let mut next = self.state();
        update(&mut next);
        self.commit(next);
    }

    /// Shallow-merge a JSON object over the current state.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] if `partial` is not an object, names a field
    /// the state lacks, or produces a value that no longer deserializes as `T`.
    /// The state is left untouched in that case.
    pub fn merge_state(&self, partial: Value) -> Result<(), MergeError> {
        let Value::Object(partial) = partial else {
            return Err(MergeError::PartialNotAnObject);
        };
        let base = serde_json::to_value(self.state())?;
        let merged = shallow_merge(base, partial, UnknownFields::Reject)?;
        let next: T = serde_json::from_value(merged)?;
        self.commit(next);
        Ok(())
    }

    /// Restore the initial state, delete the persisted entry, and start a
    /// fresh inactivity window.
    pub fn reset_state(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.current = inner.initial.clone();
            inner.remove_entry();
        }
        self.rearm();
        self.notify();
    }

    /// Forget the persisted entry while keeping the visible state.
    pub fn clear_saved_state(&self) {
        self.inner.borrow().remove_entry();
    }

    /// Cancel the inactivity timer. Call when the owning page unmounts.
    pub fn dispose(&self) {
        let pending = self.inner.borrow_mut().pending.take();
        drop(pending);
    }

    /// Register a callback that receives the new state after every update or
    /// reset, including resets fired by the inactivity timer.
    pub fn on_change(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn commit(&self, next: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.current = next;
            inner.write();
        }
        self.rearm();
        self.notify();
    }

    fn notify(&self) {
        let (listeners, snapshot) = {
            let inner = self.inner.borrow();
            (inner.listeners.clone(), inner.current.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn rearm(&self) {
        // Cancel outside the borrow: the scheduler may call back on drop.
        let previous = self.inner.borrow_mut().pending.take();
        drop(previous);

        let (delay, scheduler) = {
            let inner = self.inner.borrow();
            match (inner.persist, inner.auto_reset) {
                (true, Some(delay)) => (delay, inner.scheduler.clone()),
                _ => return,
            }
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        let handle = scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let container = PageStateContainer { inner };
                    log::debug!("page state {}: inactive, resetting", container.key());
                    container.reset_state();
                }
            }),
        );
        self.inner.borrow_mut().pending = Some(handle);
    }
}

fn load_persisted<T>(store: &dyn KeyValueStore, key: &str, initial: &T) -> T
where
    T: Clone + Serialize + DeserializeOwned,
{
    let Some(raw) = store.get(key) else {
        return initial.clone();
    };
    match merge_persisted(initial, &raw) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("page state {key}: ignoring saved entry: {err}");
            initial.clone()
        }
    }
}

fn merge_persisted<T>(initial: &T, raw: &str) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(persisted) = serde_json::from_str::<Value>(raw)? else {
        return Err(MergeError::PartialNotAnObject);
    };
    let base = serde_json::to_value(initial)?;
    let merged = shallow_merge(base, persisted, UnknownFields::Drop)?;
    Ok(serde_json::from_value(merged)?)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UnknownFields {
    Drop,
    Reject,
}

/// Overlay `overlay`'s top-level fields onto `base`, which must be an object.
fn shallow_merge(base: Value, overlay: Map<String, Value>, unknown: UnknownFields) -> Result<Value, MergeError> {
    let Value::Object(mut fields) = base else {
        return Err(MergeError::StateNotAnObject);
    };
    for (name, value) in overlay {
        if let Some(slot) = fields.get_mut(&name) {
            *slot = value;
        } else if unknown == UnknownFields::Reject {
            return Err(MergeError::UnknownField(name));
        }
    }
    Ok(Value::Object(fields))
}
