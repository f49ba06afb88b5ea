//! Watchlist page state: status tab, catalogue filter, and sort order.

#[cfg(test)]
#[path = "watchlist_test.rs"]
mod watchlist_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{ContentType, WatchlistItem, WatchlistStatus};
use crate::state::page_state::PageStateOptions;

pub const WATCHLIST_STATE_KEY: &str = "watchlistPageState";

/// Status tabs in display order; the index is what gets persisted.
pub const STATUS_TABS: [(&str, Option<WatchlistStatus>); 4] = [
    ("All", None),
    ("Want to Watch", Some(WatchlistStatus::Watchlist)),
    ("Watching", Some(WatchlistStatus::InProgress)),
    ("Watched", Some(WatchlistStatus::Watched)),
];

pub const SORT_OPTIONS: [(&str, &str); 3] = [("addedAt", "Date Added"), ("title", "Title"), ("rating", "Rating")];

/// Catalogue filter, persisted as `"ALL"` or a content type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(ContentType),
}

impl TypeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Only(content_type) => content_type.as_str(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw == "ALL" {
            return Some(Self::All);
        }
        ContentType::parse(raw).map(Self::Only)
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.as_str().to_owned()
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("unknown content type filter: {raw}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistPageState {
    /// Index into [`STATUS_TABS`].
    pub status_filter: usize,
    pub content_type_filter: TypeFilter,
    pub sort_by: String,
}

impl Default for WatchlistPageState {
    fn default() -> Self {
        Self { status_filter: 0, content_type_filter: TypeFilter::All, sort_by: "addedAt".to_owned() }
    }
}

impl WatchlistPageState {
    /// Status selected by the current tab; `None` shows every status.
    /// Unknown indices behave like the "All" tab.
    pub fn status(&self) -> Option<WatchlistStatus> {
        STATUS_TABS.get(self.status_filter).and_then(|(_, status)| *status)
    }

    pub fn matches(&self, item: &WatchlistItem) -> bool {
        let status = self.status().is_none_or(|s| s == item.status);
        let content_type = match self.content_type_filter {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => item.content.as_ref().is_some_and(|c| c.content_type == wanted),
        };
        status && content_type
    }

    /// Filter then sort `items`.
    pub fn visible(&self, items: &[WatchlistItem]) -> Vec<WatchlistItem> {
        let mut out: Vec<WatchlistItem> = items.iter().filter(|item| self.matches(item)).cloned().collect();
        sort_watchlist(&mut out, &self.sort_by);
        out
    }
}

/// Title shown for an entry, falling back to its content ID.
pub fn display_title(item: &WatchlistItem) -> String {
    item.content
        .as_ref()
        .map(|c| c.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Content {}", item.content_id))
}

/// Stable sort: `title` A-Z, `addedAt` newest first, `rating` highest first.
/// Unknown keys keep order.
pub fn sort_watchlist(items: &mut [WatchlistItem], sort_by: &str) {
    fn rating(item: &WatchlistItem) -> f64 {
        item.content.as_ref().and_then(|c| c.ratings).unwrap_or(0.0)
    }

    match sort_by {
        "title" => items.sort_by_cached_key(|item| display_title(item).to_lowercase()),
        // ISO 8601 timestamps order lexicographically.
        "addedAt" => items.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        "rating" => items.sort_by(|a, b| rating(b).total_cmp(&rating(a))),
        _ => {}
    }
}

/// Entry count per status tab, for the tab badges.
pub fn tab_counts(items: &[WatchlistItem]) -> [usize; 4] {
    let mut counts = [0; 4];
    for (index, (_, status)) in STATUS_TABS.iter().enumerate() {
        counts[index] = items.iter().filter(|item| status.is_none_or(|s| s == item.status)).count();
    }
    counts
}

pub fn watchlist_page_options() -> PageStateOptions<WatchlistPageState> {
    PageStateOptions::new(WATCHLIST_STATE_KEY, WatchlistPageState::default())
}
