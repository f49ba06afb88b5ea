//! Leptos binding for [`PageStateContainer`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call [`use_page_state`] once at mount. The container stays the source
//! of truth; the signal is a mirror fed through `on_change`, so timer-driven
//! resets re-render the page like any other update.
//!
//! TRADE-OFFS
//! ==========
//! The server renders the initial state and the persisted value is applied in
//! an effect after hydration, which avoids hydration mismatches at the cost of
//! one extra render on the client.

use std::rc::Rc;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::page_state::{MergeError, PageStateContainer, PageStateOptions};
use crate::util::storage::BrowserStorage;
use crate::util::timer::BrowserScheduler;

/// Copyable handle a page uses to read and mutate its persisted state.
pub struct PageStateSignal<T: 'static> {
    state: RwSignal<T>,
    container: StoredValue<PageStateContainer<T>, LocalStorage>,
}

impl<T: 'static> Clone for PageStateSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for PageStateSignal<T> {}

impl<T> PageStateSignal<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Tracked snapshot of the state.
    pub fn get(&self) -> T {
        self.state.get()
    }

    /// Tracked borrow of the state.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.state.with(f)
    }

    /// Untracked borrow, for event handlers.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.state.with_untracked(f)
    }

    pub fn read_only(&self) -> ReadSignal<T> {
        self.state.read_only()
    }

    /// Apply a partial update. No-op once the page has unmounted.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.container.try_with_value(|c| c.update_state(f));
    }

    /// # Errors
    ///
    /// See [`PageStateContainer::merge_state`].
    pub fn merge(&self, partial: serde_json::Value) -> Result<(), MergeError> {
        self.container.try_with_value(|c| c.merge_state(partial)).unwrap_or(Ok(()))
    }

    pub fn reset(&self) {
        self.container.try_with_value(PageStateContainer::reset_state);
    }

    pub fn clear_saved(&self) {
        self.container.try_with_value(PageStateContainer::clear_saved_state);
    }
}

/// Create the page's container against browser storage and timers, mirror it
/// into a signal, and dispose it when the owning component unmounts.
pub fn use_page_state<T>(options: PageStateOptions<T>) -> PageStateSignal<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let state = RwSignal::new(options.initial_state.clone());
    let container = PageStateContainer::new(options, Rc::new(BrowserStorage), Rc::new(BrowserScheduler));
    container.on_change(move |next: &T| {
        state.try_set(next.clone());
    });
    let container = StoredValue::new_local(container);

    Effect::new(move || {
        if let Some(restored) = container.try_with_value(PageStateContainer::state) {
            state.set(restored);
        }
    });
    on_cleanup(move || {
        container.try_with_value(PageStateContainer::dispose);
    });

    PageStateSignal { state, container }
}
