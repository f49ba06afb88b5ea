//! Home page state: which catalogue's trending row is in front.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use serde::{Deserialize, Serialize};

use crate::net::types::ContentType;
use crate::state::page_state::PageStateOptions;

pub const HOME_STATE_KEY: &str = "homePageState";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageState {
    /// Position in [`ContentType::ALL`].
    pub content_type_index: usize,
}

impl HomePageState {
    /// Selected catalogue. An index past the end falls back to movies.
    pub fn content_type(&self) -> ContentType {
        ContentType::ALL.get(self.content_type_index).copied().unwrap_or_default()
    }

    pub fn select(&mut self, content_type: ContentType) {
        self.content_type_index = ContentType::ALL.iter().position(|t| *t == content_type).unwrap_or(0);
    }
}

pub fn home_page_options() -> PageStateOptions<HomePageState> {
    PageStateOptions::new(HOME_STATE_KEY, HomePageState::default())
}
