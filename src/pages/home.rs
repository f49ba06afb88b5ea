//! Landing page: trending titles, one catalogue tab at a time.
//!
//! The selected tab lives in the `homePageState` container, so it survives
//! navigation for two idle minutes.

use leptos::prelude::*;

use crate::components::content_card::{ContentCard, watchlist_add_callback};
use crate::components::page_shell::PageShell;
use crate::net::types::{Content, ContentType};
use crate::state::home::home_page_options;
use crate::state::page_signal::use_page_state;

/// Titles shown per trending row.
pub const TRENDING_LIMIT: usize = 12;

#[component]
fn TrendingRow(content_type: ContentType, on_add: Callback<i64>) -> impl IntoView {
    let items = RwSignal::new(Vec::<Content>::new());
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_trending(content_type).await {
            Ok(mut list) => {
                list.truncate(TRENDING_LIMIT);
                items.set(list);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    });

    view! {
        <section class="trending">
            <h2 class="trending__title">{format!("Trending {}", content_type.label())}</h2>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="trending__row">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|content| view! { <ContentCard content=content on_add=on_add/> })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let page = use_page_state(home_page_options());
    let selected = Memo::new(move |_| page.with(|s| s.content_type()));
    let notice = RwSignal::new(None::<String>);
    let on_add = watchlist_add_callback(notice);

    view! {
        <PageShell title="Discover">
            <Show when=move || notice.get().is_some()>
                <p class="notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <div class="tabs">
                {ContentType::ALL
                    .into_iter()
                    .map(|ct| {
                        view! {
                            <button
                                class="tabs__tab"
                                class:tabs__tab--active=move || selected.get() == ct
                                on:click=move |_| page.update(|s| s.select(ct))
                            >
                                {ct.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || view! { <TrendingRow content_type=selected.get() on_add=on_add/> }}
        </PageShell>
    }
}
