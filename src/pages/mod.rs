//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages with persisted state read and write it through
//! `state::page_signal`.

pub mod ai;
pub mod channel_chat;
pub mod channels;
pub mod content;
pub mod content_details;
pub mod home;
pub mod login;
pub mod profile;
pub mod search;
pub mod watchlist;
