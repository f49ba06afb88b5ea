//! AI recommendations page state.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{Content, ContentType, RecommendationRequest};
use crate::state::page_state::PageStateOptions;

pub const AI_STATE_KEY: &str = "aiPageState";

/// Shown when the user submits without describing anything.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Describe what you'd like to watch first.";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPageState {
    pub description: String,
    /// `None` asks across every catalogue.
    pub content_type: Option<ContentType>,
    pub recommendations: Vec<Content>,
    pub has_searched: bool,
}

impl AiPageState {
    /// Request for the current description.
    ///
    /// # Errors
    ///
    /// Returns [`EMPTY_DESCRIPTION_MESSAGE`] when the description is blank.
    pub fn request(&self) -> Result<RecommendationRequest, &'static str> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(EMPTY_DESCRIPTION_MESSAGE);
        }
        Ok(RecommendationRequest { description: description.to_owned(), content_type: self.content_type })
    }

    pub fn apply_recommendations(&mut self, recommendations: Vec<Content>) {
        self.recommendations = recommendations;
        self.has_searched = true;
    }
}

pub fn ai_page_options() -> PageStateOptions<AiPageState> {
    PageStateOptions::new(AI_STATE_KEY, AiPageState::default())
}
