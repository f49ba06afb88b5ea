//! REST API helpers for the Discover backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the stored
//! bearer token attached to every request.
//! Server-side (SSR) and native tests: every call resolves to
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so fetch failures degrade to
//! inline messages. A 401 clears the stored token and sends the browser to
//! `/login` before the error is returned.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AddToWatchlistRequest, AuthResponse, Channel, Content, ContentDetails, ContentType, CreateChannelRequest,
    CreateMessageRequest, CreateReviewRequest, Credentials, Message, ProfileUpdate,
    RecommendationRequest, Review, UpdateWatchlistItemRequest, UserProfile, WatchlistItem,
};

/// Base URL of the API, fixed at build time through `DISCOVER_API_URL`.
pub const API_BASE_URL: &str = match option_env!("DISCOVER_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The stored token was rejected; the session has been cleared.
    #[error("session expired, please sign in again")]
    Unauthorized,
    /// Non-success status with the server's message when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

/// Resources the moderation endpoints can delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationTarget {
    Message,
    Channel,
    Review,
}

pub fn api_url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

fn content_endpoint(id: i64) -> String {
    format!("/api/content/{id}")
}

fn content_details_endpoint(external_id: &str) -> String {
    format!("/api/content/details/{external_id}")
}

fn content_search_endpoint(content_type: ContentType) -> String {
    format!("/api/content/search/{}", content_type.as_str())
}

fn catalog_endpoint(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Movie => "/api/content/movies",
        ContentType::Series => "/api/content/series",
        ContentType::Anime => "/api/content/anime",
    }
}

fn trending_endpoint(content_type: ContentType) -> String {
    format!("/api/content/trending/{}", content_type.as_str())
}

fn user_profile_endpoint(user_id: i64) -> String {
    format!("/api/users/{user_id}/profile")
}

fn channel_endpoint(channel_id: i64) -> String {
    format!("/api/channels/{channel_id}")
}

fn channel_action_endpoint(action: &str, channel_id: i64) -> String {
    format!("/api/channels/{action}/{channel_id}")
}

fn channel_messages_endpoint(channel_id: i64) -> String {
    format!("/api/messages/channel/{channel_id}")
}

fn watchlist_remove_endpoint(item_id: i64) -> String {
    format!("/api/watchlist/remove/{item_id}")
}

fn reviews_endpoint(content_id: i64) -> String {
    format!("/api/reviews/movie/{content_id}")
}

fn moderation_endpoint(target: ModerationTarget, id: i64) -> String {
    let kind = match target {
        ModerationTarget::Message => "message",
        ModerationTarget::Channel => "channel",
        ModerationTarget::Review => "review",
    };
    format!("/api/moderation/{kind}/{id}")
}

/// Map a non-success response to an [`ApiError`], preferring the server's
/// own message.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let message = serde_json::from_str::<super::types::ErrorResponse>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};

    use super::{ApiError, api_url, status_error};
    use crate::util::auth::{handle_unauthorized, stored_token};
    use crate::util::storage::BrowserStorage;

    pub(super) enum Verb {
        Get,
        Post,
        Put,
        Delete,
    }

    pub(super) fn request(verb: Verb, path: &str, query: &[(&str, &str)]) -> RequestBuilder {
        let url = api_url(path);
        let mut builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Delete => Request::delete(&url),
        };
        if !query.is_empty() {
            builder = builder.query(query.iter().copied());
        }
        if let Some(token) = stored_token(&BrowserStorage) {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        builder
    }

    pub(super) async fn send(builder: RequestBuilder, body: Option<serde_json::Value>) -> Result<Response, ApiError> {
        let request = match body {
            Some(body) => builder.json(&body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        if status == 401 {
            handle_unauthorized(&BrowserStorage);
        }
        let text = resp.text().await.unwrap_or_default();
        Err(status_error(status, &text))
    }

    pub(super) async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send(http::request(http::Verb::Get, path, query), None).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, query);
        Err(ApiError::Unavailable)
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = to_body(body)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send(http::request(http::Verb::Post, path, &[]), Some(body)).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        Err(ApiError::Unavailable)
    }
}

async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = to_body(body)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send(http::request(http::Verb::Put, path, &[]), Some(body)).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        Err(ApiError::Unavailable)
    }
}

/// POST whose response body is plain text.
async fn post_for_text<B: Serialize>(path: &str, body: &B) -> Result<String, ApiError> {
    let body = to_body(body)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send(http::request(http::Verb::Post, path, &[]), Some(body)).await?;
        resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        Err(ApiError::Unavailable)
    }
}

/// POST without a body whose response is ignored.
async fn post_empty(path: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send(http::request(http::Verb::Post, path, &[]), None).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        Err(ApiError::Unavailable)
    }
}

async fn delete(path: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send(http::request(http::Verb::Delete, path, &[]), None).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        Err(ApiError::Unavailable)
    }
}

// =============================================================
// Auth and users
// =============================================================

/// Exchange credentials for a bearer token via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or credentials are rejected.
pub async fn login(credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    post_json("/api/auth/login", credentials).await
}

/// Create an account via `POST /api/auth/register`. Returns the server's
/// confirmation text.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the username is taken.
pub async fn register(credentials: &Credentials) -> Result<String, ApiError> {
    post_for_text("/api/auth/register", credentials).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_user_profile(user_id: i64) -> Result<UserProfile, ApiError> {
    get_json(&user_profile_endpoint(user_id), &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn update_user_profile(user_id: i64, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
    put_json(&user_profile_endpoint(user_id), update).await
}

// =============================================================
// Content
// =============================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_content(id: i64) -> Result<Content, ApiError> {
    get_json(&content_endpoint(id), &[]).await
}

/// Details for a title identified by its upstream catalogue ID.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_content_details(external_id: &str, content_type: ContentType) -> Result<ContentDetails, ApiError> {
    get_json(&content_details_endpoint(external_id), &[("type", content_type.as_str())]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn search_content(content_type: ContentType, query: &str) -> Result<Vec<Content>, ApiError> {
    get_json(&content_search_endpoint(content_type), &[("query", query)]).await
}

/// Whole catalogue for one content type.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_catalog(content_type: ContentType) -> Result<Vec<Content>, ApiError> {
    get_json(catalog_endpoint(content_type), &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_trending(content_type: ContentType) -> Result<Vec<Content>, ApiError> {
    get_json(&trending_endpoint(content_type), &[]).await
}

// =============================================================
// Channels and messages
// =============================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_channels() -> Result<Vec<Channel>, ApiError> {
    get_json("/api/channels", &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_channel(channel_id: i64) -> Result<Channel, ApiError> {
    get_json(&channel_endpoint(channel_id), &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn create_channel(request: &CreateChannelRequest) -> Result<Channel, ApiError> {
    post_json("/api/channels/create", request).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn delete_channel(channel_id: i64) -> Result<(), ApiError> {
    post_empty(&channel_action_endpoint("delete", channel_id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn join_channel(channel_id: i64) -> Result<(), ApiError> {
    log::debug!("joining channel {channel_id}");
    post_empty(&channel_action_endpoint("join", channel_id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn leave_channel(channel_id: i64) -> Result<(), ApiError> {
    log::debug!("leaving channel {channel_id}");
    delete(&channel_action_endpoint("leave", channel_id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_messages(channel_id: i64) -> Result<Vec<Message>, ApiError> {
    get_json(&channel_messages_endpoint(channel_id), &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn post_message(channel_id: i64, request: &CreateMessageRequest) -> Result<Message, ApiError> {
    post_json(&channel_messages_endpoint(channel_id), request).await
}

// =============================================================
// Watchlist, reviews, recommendations
// =============================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn add_to_watchlist(request: &AddToWatchlistRequest) -> Result<WatchlistItem, ApiError> {
    post_json("/api/watchlist/add", request).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn update_watchlist_item(request: &UpdateWatchlistItemRequest) -> Result<WatchlistItem, ApiError> {
    post_json("/api/watchlist/update", request).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn remove_from_watchlist(item_id: i64) -> Result<(), ApiError> {
    delete(&watchlist_remove_endpoint(item_id)).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_watchlist() -> Result<Vec<WatchlistItem>, ApiError> {
    get_json("/api/watchlist/user", &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_reviews(content_id: i64) -> Result<Vec<Review>, ApiError> {
    get_json(&reviews_endpoint(content_id), &[]).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn create_review(request: &CreateReviewRequest) -> Result<Review, ApiError> {
    post_json("/api/reviews/add", request).await
}

/// Titles matching a free-text description.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn fetch_recommendations(request: &RecommendationRequest) -> Result<Vec<Content>, ApiError> {
    post_json("/api/recommendations", request).await
}

/// Delete a message, channel, or review as a moderator.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the user lacks the role.
pub async fn moderate_delete(target: ModerationTarget, id: i64) -> Result<(), ApiError> {
    delete(&moderation_endpoint(target, id)).await
}
