//! Poster card for a single title, shared by every grid page.

#[cfg(test)]
#[path = "content_card_test.rs"]
mod content_card_test;

use leptos::prelude::*;

use crate::net::types::Content;

/// Route of the details page for `content`, e.g. `/content/42/movie`.
pub fn content_link(content: &Content) -> String {
    format!("/content/{}/{}", content.id, content.content_type.as_str().to_lowercase())
}

/// Rating badge text, one decimal place.
pub fn rating_label(ratings: Option<f64>) -> Option<String> {
    ratings.map(|r| format!("★ {r:.1}"))
}

#[component]
pub fn ContentCard(
    content: Content,
    /// Adds the title to the watchlist when present.
    #[prop(optional)]
    on_add: Option<Callback<i64>>,
) -> impl IntoView {
    let id = content.id;
    let link = content_link(&content);
    let year = content.release_year().map(|y| y.to_string()).unwrap_or_default();
    let rating = rating_label(content.ratings);
    let genres = content.genre_names.iter().take(3).cloned().collect::<Vec<_>>().join(" · ");
    let poster = content.poster_url.clone().filter(|p| !p.is_empty());
    let title = content.title;

    view! {
        <article class="content-card">
            <a class="content-card__link" href=link.clone()>
                {match poster {
                    Some(src) => {
                        view! { <img class="content-card__poster" src=src alt=title.clone() loading="lazy"/> }
                            .into_any()
                    }
                    None => view! { <div class="content-card__poster content-card__poster--empty"></div> }.into_any(),
                }}
            </a>
            <div class="content-card__body">
                <h3 class="content-card__title">
                    <a href=link>{title}</a>
                </h3>
                <p class="content-card__meta">
                    <span>{year}</span>
                    {rating.map(|r| view! { <span class="content-card__rating">{r}</span> })}
                </p>
                <p class="content-card__genres">{genres}</p>
                {on_add.map(|on_add| {
                    view! {
                        <button class="btn content-card__add" on:click=move |_| on_add.run(id)>
                            "+ Watchlist"
                        </button>
                    }
                })}
            </div>
        </article>
    }
}

/// Callback for a card's watchlist button. The outcome lands in `notice`.
pub fn watchlist_add_callback(notice: RwSignal<Option<String>>) -> Callback<i64> {
    Callback::new(move |content_id: i64| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::types::{AddToWatchlistRequest, WatchlistStatus};

            let request = AddToWatchlistRequest { movie_id: content_id, status: WatchlistStatus::Watchlist };
            let message = match crate::net::api::add_to_watchlist(&request).await {
                Ok(_) => "Added to watchlist".to_owned(),
                Err(e) => format!("Could not add to watchlist: {e}"),
            };
            notice.set(Some(message));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (content_id, notice);
    })
}
