//! Light/dark theme preference.
//!
//! Reads the saved mode from the persistent store and applies a `data-theme`
//! attribute to the `<html>` element. Changing the mode writes it back.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort; SSR paths no-op on the DOM to keep
//! server rendering deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::util::storage::KeyValueStore;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "themeMode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Saved preference, or dark when nothing usable is stored.
pub fn read_preference(store: &dyn KeyValueStore) -> ThemeMode {
    store.get(THEME_KEY).as_deref().and_then(ThemeMode::parse).unwrap_or_default()
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(mode: ThemeMode) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", mode.as_str());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = mode;
    }
}

/// Apply `mode` and remember it.
pub fn set_preference(store: &dyn KeyValueStore, mode: ThemeMode) {
    apply(mode);
    if let Err(err) = store.set(THEME_KEY, mode.as_str()) {
        log::warn!("theme preference not saved: {err}");
    }
}

/// Flip the theme and persist the new mode.
pub fn toggle(store: &dyn KeyValueStore, current: ThemeMode) -> ThemeMode {
    let next = current.toggled();
    set_preference(store, next);
    next
}
