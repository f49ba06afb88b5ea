//! Application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `page_state` is the persistence container every routed page builds on;
//! `page_signal` binds it to Leptos. The per-page modules define each page's
//! persisted shape plus the pure derivations the page renders from.

pub mod ai;
pub mod auth;
pub mod content;
pub mod home;
pub mod page_signal;
pub mod page_state;
pub mod search;
pub mod watchlist;
