//! Title search within one catalogue.
//!
//! The last query and its results persist under `searchPageState`; returning
//! to the page shows them without searching again.

use leptos::prelude::*;

use crate::components::content_card::{ContentCard, watchlist_add_callback};
use crate::components::page_shell::PageShell;
use crate::net::types::ContentType;
use crate::state::page_signal::{PageStateSignal, use_page_state};
use crate::state::search::{SearchPageState, search_page_options};

fn run_search(page: PageStateSignal<SearchPageState>, searching: RwSignal<bool>, error: RwSignal<Option<String>>) {
    let Some(query) = page.with_untracked(SearchPageState::normalized_query) else {
        return;
    };
    let content_type = page.with_untracked(|s| s.content_type);
    searching.set(true);
    error.set(None);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::search_content(content_type, &query).await {
            Ok(results) => page.update(|s| s.apply_results(results)),
            Err(e) => error.set(Some(format!("Search failed: {e}"))),
        }
        searching.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (query, content_type);
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let page = use_page_state(search_page_options());
    let searching = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let on_add = watchlist_add_callback(notice);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_search(page, searching, error);
    };

    let on_type = move |content_type: ContentType| {
        page.update(|s| s.content_type = content_type);
        // Re-run an existing search against the new catalogue.
        if page.with_untracked(|s| s.has_searched) {
            run_search(page, searching, error);
        }
    };

    let on_clear = move |_| {
        page.update(SearchPageState::clear);
        page.clear_saved();
        error.set(None);
    };

    view! {
        <PageShell title="Search">
            <div class="search-page">
                <form class="search-form" on:submit=on_submit>
                    <input
                        class="search-form__input"
                        type="search"
                        placeholder="Search by title"
                        prop:value=move || page.with(|s| s.search_query.clone())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            page.update(|s| s.search_query = query);
                        }
                    />
                    <button
                        class="btn search-form__submit"
                        type="submit"
                        disabled=move || searching.get() || page.with(|s| s.normalized_query().is_none())
                    >
                        {move || if searching.get() { "Searching..." } else { "Search" }}
                    </button>
                    <button class="btn search-form__clear" type="button" on:click=on_clear>
                        "Clear"
                    </button>
                </form>
                <div class="tabs">
                    {ContentType::ALL
                        .into_iter()
                        .map(|ct| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || page.with(|s| s.content_type == ct)
                                    on:click=move |_| on_type(ct)
                                >
                                    {ct.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || notice.get().is_some()>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || page.with(|s| s.has_searched)>
                    <p class="search-page__summary">{move || page.with(SearchPageState::summary)}</p>
                    <div class="content-grid">
                        {move || {
                            page.with(|s| s.search_results.clone())
                                .into_iter()
                                .map(|content| view! { <ContentCard content=content on_add=on_add/> })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        </PageShell>
    }
}
