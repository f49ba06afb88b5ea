//! Content browser state and the pure filter/sort/paginate pipeline behind it.
//!
//! DESIGN
//! ======
//! Only the user's choices are persisted; the catalogue itself is refetched on
//! mount. Every derivation here is a plain function over `&[Content]` so the
//! page can recompute it from a memo without touching the container.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::net::types::{Content, ContentType};
use crate::state::page_state::PageStateOptions;

pub const CONTENT_STATE_KEY: &str = "contentPageState";

/// Cards shown per page of the content grid.
pub const ITEMS_PER_PAGE: usize = 40;

pub const DEFAULT_SORT: &str = "title-asc";

/// Sort choices offered by the page, as `(key, label)`.
pub const SORT_OPTIONS: [(&str, &str); 6] = [
    ("title-asc", "Title (A-Z)"),
    ("title-desc", "Title (Z-A)"),
    ("year-desc", "Year (Newest)"),
    ("year-asc", "Year (Oldest)"),
    ("rating-desc", "Rating (Highest)"),
    ("rating-asc", "Rating (Lowest)"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPageState {
    pub content_type: ContentType,
    /// Empty means any genre.
    pub selected_genre: String,
    /// Four-digit year as text; empty means any year.
    pub selected_year: String,
    pub min_rating: f64,
    pub sort_by: String,
    /// 1-based.
    pub current_page: usize,
}

impl Default for ContentPageState {
    fn default() -> Self {
        Self {
            content_type: ContentType::Movie,
            selected_genre: String::new(),
            selected_year: String::new(),
            min_rating: 0.0,
            sort_by: DEFAULT_SORT.to_owned(),
            current_page: 1,
        }
    }
}

impl ContentPageState {
    /// Switch catalogue. Filters belong to the old catalogue, so they go too.
    pub fn select_content_type(&mut self, content_type: ContentType) {
        self.reset_filters();
        self.content_type = content_type;
    }

    pub fn reset_filters(&mut self) {
        let content_type = self.content_type;
        *self = Self { content_type, ..Self::default() };
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selected_genre.is_empty() || !self.selected_year.is_empty() || self.min_rating > 0.0
    }

    /// Whether `item` passes the genre, year, and minimum-rating filters.
    /// Items without a rating always pass the rating filter.
    pub fn matches(&self, item: &Content) -> bool {
        let genre = self.selected_genre.is_empty() || item.genre_names.iter().any(|g| *g == self.selected_genre);
        let year = self.selected_year.is_empty()
            || item.release_year().is_some_and(|y| y.to_string() == self.selected_year);
        let rating = item.ratings.is_none_or(|r| r >= self.min_rating);
        genre && year && rating
    }

    /// Filter then sort `items`.
    pub fn visible(&self, items: &[Content]) -> Vec<Content> {
        let mut out: Vec<Content> = items.iter().filter(|item| self.matches(item)).cloned().collect();
        sort_content(&mut out, &self.sort_by);
        out
    }
}

/// Distinct genres across `items`, alphabetical.
pub fn genre_options(items: &[Content]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.genre_names.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct release years across `items`, newest first.
pub fn year_options(items: &[Content]) -> Vec<i32> {
    items
        .iter()
        .filter_map(Content::release_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Stable sort by one of the [`SORT_OPTIONS`] keys. Unknown keys keep order.
/// Titles compare case-insensitively; missing years and ratings sort as zero.
pub fn sort_content(items: &mut [Content], sort_by: &str) {
    fn title(c: &Content) -> String {
        c.title.to_lowercase()
    }
    fn year(c: &Content) -> i32 {
        c.release_year().unwrap_or(0)
    }
    fn rating(c: &Content) -> f64 {
        c.ratings.unwrap_or(0.0)
    }

    match sort_by {
        "title-asc" => items.sort_by_cached_key(title),
        "title-desc" => items.sort_by(|a, b| title(b).cmp(&title(a))),
        "year-asc" => items.sort_by_key(year),
        "year-desc" => items.sort_by_key(|c| std::cmp::Reverse(year(c))),
        "rating-asc" => items.sort_by(|a, b| rating(a).total_cmp(&rating(b))),
        "rating-desc" => items.sort_by(|a, b| rating(b).total_cmp(&rating(a))),
        _ => {}
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: usize) -> usize {
    total.div_ceil(ITEMS_PER_PAGE)
}

/// Slice of `items` shown on 1-based `page`. Out-of-range pages are empty.
pub fn paginate(items: &[Content], page: usize) -> &[Content] {
    let start = page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + ITEMS_PER_PAGE).min(items.len());
    &items[start..end]
}

pub fn content_page_options() -> PageStateOptions<ContentPageState> {
    PageStateOptions::new(CONTENT_STATE_KEY, ContentPageState::default())
}
