//! Search page state: last query, selected catalogue, and its results.
//!
//! Results are stored alongside the query so returning to the page shows the
//! previous search without refetching.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{Content, ContentType};
use crate::state::page_state::PageStateOptions;

pub const SEARCH_STATE_KEY: &str = "searchPageState";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageState {
    pub search_query: String,
    pub content_type: ContentType,
    pub search_results: Vec<Content>,
    pub has_searched: bool,
}

impl SearchPageState {
    /// Trimmed query, or `None` when there is nothing to submit.
    pub fn normalized_query(&self) -> Option<String> {
        let query = self.search_query.trim();
        (!query.is_empty()).then(|| query.to_owned())
    }

    /// Record a completed search.
    pub fn apply_results(&mut self, results: Vec<Content>) {
        self.search_results = results;
        self.has_searched = true;
    }

    /// Drop query and results but keep the selected catalogue.
    pub fn clear(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
        self.has_searched = false;
    }

    /// Heading shown above results.
    pub fn summary(&self) -> String {
        match self.search_results.len() {
            0 => format!("No results for \"{}\"", self.search_query.trim()),
            1 => format!("1 result for \"{}\"", self.search_query.trim()),
            n => format!("{n} results for \"{}\"", self.search_query.trim()),
        }
    }
}

pub fn search_page_options() -> PageStateOptions<SearchPageState> {
    PageStateOptions::new(SEARCH_STATE_KEY, SearchPageState::default())
}
