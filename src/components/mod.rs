//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome and content cards while reading shared
//! state from Leptos context providers.

pub mod content_card;
pub mod navigation;
pub mod page_shell;
pub mod pager;
