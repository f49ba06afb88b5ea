//! Wire DTOs for the Discover REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's camelCase JSON so serde round-trips stay
//! lossless. The server emits `null` for empty collections in places, so list
//! fields accept `null` as empty.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Catalogue a piece of content belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    #[default]
    Movie,
    Series,
    Anime,
}

impl ContentType {
    pub const ALL: [Self; 3] = [Self::Movie, Self::Series, Self::Anime];

    /// Wire/path form, e.g. `MOVIE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Series => "SERIES",
            Self::Anime => "ANIME",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "TV Series",
            Self::Anime => "Anime",
        }
    }
}

/// A movie, series, or anime summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_names: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_path: Option<String>,
    pub trailer_url: Option<String>,
    /// ISO date (`YYYY-MM-DD`). The server keeps the snake_case name here.
    #[serde(rename = "release_date")]
    pub release_date: Option<String>,
    pub cast_list: Option<String>,
    pub ratings: Option<f64>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_content_ids: Vec<String>,
    pub trailer_id: Option<String>,
}

impl Content {
    /// Year prefix of `release_date`, if it parses.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref()?.get(..4)?.parse().ok()
    }
}

/// Full content details including related titles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    #[serde(flatten)]
    pub content: Content,
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_content: Vec<Content>,
}

/// A topic channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub created_at: String,
    pub created_by_id: i64,
    pub created_by_username: String,
    pub member_count: i64,
    /// Whether the current user is a member.
    #[serde(default)]
    pub joined: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub description: String,
}

/// A chat message posted to a channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub channel_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub parent_message_id: Option<i64>,
    pub created_at: String,
    #[serde(default)]
    pub moderated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<i64>,
}

/// Progress of a watchlist entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchlistStatus {
    #[default]
    Watchlist,
    InProgress,
    Watched,
}

impl WatchlistStatus {
    pub const ALL: [Self; 3] = [Self::Watchlist, Self::InProgress, Self::Watched];

    /// Wire form, e.g. `IN_PROGRESS`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watchlist => "WATCHLIST",
            Self::InProgress => "IN_PROGRESS",
            Self::Watched => "WATCHED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Watchlist => "Want to Watch",
            Self::InProgress => "Watching",
            Self::Watched => "Watched",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: i64,
    pub user_id: i64,
    pub content_id: i64,
    pub content: Option<Content>,
    pub status: WatchlistStatus,
    /// ISO 8601 timestamp.
    pub added_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWatchlistRequest {
    pub movie_id: i64,
    pub status: WatchlistStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWatchlistItemRequest {
    pub id: i64,
    pub status: WatchlistStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub content_id: i64,
    pub rating: i32,
    pub review_text: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub movie_id: i64,
    pub rating: i32,
    pub review_text: String,
}

/// Free-text description used to ask for recommendations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
}

/// Username/password pair for both login and registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// The signed-in user, reconstructed from the auth token's claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub preferences: Option<String>,
    pub profile_info: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// Overlay the non-empty fields of an updated profile.
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        fn pick(next: Option<&String>, current: &mut Option<String>) {
            if let Some(value) = next.filter(|v| !v.is_empty()) {
                *current = Some(value.clone());
            }
        }
        if !profile.username.is_empty() {
            self.username.clone_from(&profile.username);
        }
        pick(profile.bio.as_ref(), &mut self.bio);
        pick(profile.avatar.as_ref(), &mut self.avatar);
        pick(profile.preferences.as_ref(), &mut self.preferences);
        pick(profile.profile_info.as_ref(), &mut self.profile_info);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub preferences: Option<String>,
    pub profile_info: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Partial profile update; absent fields are left alone by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_info: Option<String>,
}

/// Error body returned by the server on failed requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
