//! Details for one title: metadata, related titles, reviews, and the
//! watchlist action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from any content card at `/content/:id/:type`. The title is loaded
//! by its catalogue id; when it carries an external id the enriched details
//! (gallery and related titles) are fetched as well. Reviews load alongside.

#[cfg(test)]
#[path = "content_details_test.rs"]
mod content_details_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::content_card::{ContentCard, rating_label, watchlist_add_callback};
use crate::components::page_shell::PageShell;
use crate::net::types::{Content, ContentDetails, ContentType, CreateReviewRequest, Review};
use crate::pages::channel_chat::is_moderator;
use crate::state::auth::AuthState;

/// Inclusive bounds of a review score, on the same ten-point scale as ratings.
pub const REVIEW_RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Catalogue id and type from the route segments. The type segment is
/// case-insensitive and defaults to movies when absent.
pub fn parse_route(id: Option<&str>, kind: Option<&str>) -> Option<(i64, ContentType)> {
    let id = id?.parse::<i64>().ok()?;
    let content_type = match kind {
        None => ContentType::Movie,
        Some(raw) => ContentType::parse(&raw.to_ascii_uppercase())?,
    };
    Some((id, content_type))
}

/// Review to submit for `content_id`.
///
/// # Errors
///
/// Returns a message for the form when the score is out of range or the
/// text is blank.
pub fn validate_review(content_id: i64, rating: i32, text: &str) -> Result<CreateReviewRequest, &'static str> {
    if !REVIEW_RATING_RANGE.contains(&rating) {
        return Err("Pick a score from 1 to 10.");
    }
    let review_text = text.trim();
    if review_text.is_empty() {
        return Err("Write a few words about it.");
    }
    Ok(CreateReviewRequest { movie_id: content_id, rating, review_text: review_text.to_owned() })
}

/// Mean review score, or `None` without reviews.
#[allow(clippy::cast_precision_loss)]
pub fn average_review(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    Some(total as f64 / reviews.len() as f64)
}

/// `YYYY-MM-DD` from an ISO 8601 timestamp, or the raw value if it is shorter.
pub fn review_date(created_at: &str) -> &str {
    created_at.get(..10).unwrap_or(created_at)
}

fn load_details(
    id: i64,
    content_type: ContentType,
    details: RwSignal<Option<ContentDetails>>,
    reviews: RwSignal<Vec<Review>>,
    error: RwSignal<Option<String>>,
) {
    error.set(None);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::api;

        let content = match api::fetch_content(id).await {
            Ok(content) => content,
            Err(e) => {
                error.set(Some(format!("Failed to load title: {e}")));
                return;
            }
        };
        let enriched = match content.external_id.as_deref() {
            Some(external_id) => api::fetch_content_details(external_id, content_type).await.map_err(|e| {
                log::warn!("details for {external_id} unavailable: {e}");
            }),
            None => Err(()),
        };
        details.set(Some(enriched.unwrap_or_else(|()| ContentDetails { content, ..ContentDetails::default() })));

        match api::fetch_reviews(id).await {
            Ok(list) => reviews.set(list),
            Err(e) => log::warn!("reviews for {id} unavailable: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (id, content_type, details, reviews);
}

#[component]
pub fn ContentDetailsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let route = Memo::new(move |_| {
        params.with(|p| parse_route(p.get("id").as_deref(), p.get("type").as_deref()))
    });

    let details = RwSignal::new(None::<ContentDetails>);
    let reviews = RwSignal::new(Vec::<Review>::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let on_add = watchlist_add_callback(notice);

    let score = RwSignal::new(8);
    let draft = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<&'static str>);
    let posting = RwSignal::new(false);

    Effect::new(move || match route.get() {
        Some((id, content_type)) => load_details(id, content_type, details, reviews, error),
        None => error.set(Some("Unknown title.".to_owned())),
    });

    let moderator = move || auth.with(|a| a.user.as_ref().is_some_and(is_moderator));
    let content = move || details.with(|d| d.as_ref().map(|d| d.content.clone()));

    let on_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((id, _)) = route.get_untracked() else {
            return;
        };
        let request = match validate_review(id, score.get_untracked(), &draft.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);
        posting.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_review(&request).await {
                Ok(review) => {
                    reviews.update(|list| list.insert(0, review));
                    draft.set(String::new());
                }
                Err(e) => notice.set(Some(format!("Review not posted: {e}"))),
            }
            posting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_moderate = move |review_id: i64| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{ModerationTarget, moderate_delete};
            match moderate_delete(ModerationTarget::Review, review_id).await {
                Ok(()) => reviews.update(|list| list.retain(|r| r.id != review_id)),
                Err(e) => notice.set(Some(format!("Delete failed: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = review_id;
    };

    view! {
        <PageShell title="Details">
            <div class="details-page">
                <a class="btn" href="/content">"‹ Browse"</a>

                <Show when=move || notice.get().is_some()>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                {move || {
                    content()
                        .map(|c| {
                            let id = c.id;
                            let year = c.release_date.clone().unwrap_or_default();
                            let genres = c.genre_names.join(" · ");
                            let cast = c.cast_list.clone().unwrap_or_default();
                            let poster = c.poster_url.clone().filter(|p| !p.is_empty()).unwrap_or_default();
                            let alt = c.title.clone();
                            view! {
                                <article class="details">
                                    <img class="details__poster" src=poster alt=alt/>
                                    <div class="details__body">
                                        <h2 class="details__title">{c.title}</h2>
                                        <p class="details__meta">
                                            <span class="details__type">{c.content_type.label()}</span>
                                            <span>{year}</span>
                                            {rating_label(c.ratings).map(|r| view! { <span class="details__rating">{r}</span> })}
                                        </p>
                                        <p class="details__genres">{genres}</p>
                                        <p class="details__description">{c.description}</p>
                                        <p class="details__cast">{cast}</p>
                                        <button class="btn details__add" on:click=move |_| on_add.run(id)>
                                            "+ Watchlist"
                                        </button>
                                    </div>
                                </article>
                            }
                        })
                }}

                <Show when=move || details.with(|d| d.as_ref().is_some_and(|d| !d.content.image_urls.is_empty()))>
                    <section class="gallery">
                        <h3>"Gallery"</h3>
                        {move || {
                            details
                                .with(|d| d.as_ref().map(|d| d.content.image_urls.clone()).unwrap_or_default())
                                .into_iter()
                                .map(|src| view! { <img class="gallery__image" src=src loading="lazy"/> })
                                .collect_view()
                        }}
                    </section>
                </Show>

                <Show when=move || details.with(|d| d.as_ref().is_some_and(|d| !d.recommended_content.is_empty()))>
                    <section class="trending">
                        <h3 class="trending__title">"You might also like"</h3>
                        <div class="trending__row">
                            {move || {
                                details
                                    .with(|d| d.as_ref().map(|d| d.recommended_content.clone()).unwrap_or_default())
                                    .into_iter()
                                    .map(|content: Content| view! { <ContentCard content=content on_add=on_add/> })
                                    .collect_view()
                            }}
                        </div>
                    </section>
                </Show>

                <section class="reviews">
                    <h3>
                        "Reviews "
                        {move || {
                            reviews.with(|list| average_review(list).map(|avg| format!("({avg:.1} avg)"))).unwrap_or_default()
                        }}
                    </h3>
                    <form class="review-form" on:submit=on_review>
                        <select
                            class="review-form__score"
                            prop:value=move || score.get().to_string()
                            on:change=move |ev| score.set(event_target_value(&ev).parse().unwrap_or(0))
                        >
                            {REVIEW_RATING_RANGE
                                .rev()
                                .map(|n| {
                                    let value = n.to_string();
                                    view! { <option value=value>{n}</option> }
                                })
                                .collect_view()}
                        </select>
                        <textarea
                            class="review-form__text"
                            placeholder="What did you think?"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn" type="submit" disabled=move || posting.get()>
                            "Post review"
                        </button>
                        <Show when=move || form_error.get().is_some()>
                            <p class="error">{move || form_error.get().unwrap_or_default()}</p>
                        </Show>
                    </form>
                    <ul class="review-list">
                        {move || {
                            reviews
                                .get()
                                .into_iter()
                                .map(|r| {
                                    let id = r.id;
                                    view! {
                                        <li class="review">
                                            <span class="review__score">{format!("{}/10", r.rating)}</span>
                                            <span class="review__date">{review_date(&r.created_at).to_owned()}</span>
                                            <p class="review__text">{r.review_text}</p>
                                            <Show when=moderator>
                                                <button class="btn review__delete" on:click=move |_| on_moderate(id)>
                                                    "Delete"
                                                </button>
                                            </Show>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <Show when=move || reviews.with(Vec::is_empty)>
                        <p class="empty">"No reviews yet."</p>
                    </Show>
                </section>
            </div>
        </PageShell>
    }
}
