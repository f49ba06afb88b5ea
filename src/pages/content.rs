//! Content browser: one catalogue at a time with genre, year, and rating
//! filters, sorting, and pagination.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user's choices live in the `contentPageState` container so leaving and
//! returning within the inactivity window restores the same view. The
//! catalogue itself is refetched whenever the content type changes.

use leptos::prelude::*;

use crate::components::content_card::{ContentCard, watchlist_add_callback};
use crate::components::page_shell::PageShell;
use crate::components::pager::Pager;
use crate::net::types::{Content, ContentType};
use crate::state::content::{SORT_OPTIONS, content_page_options, genre_options, paginate, total_pages, year_options};
use crate::state::page_signal::use_page_state;

fn load_catalog(
    content_type: ContentType,
    catalogue: RwSignal<Vec<Content>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
) {
    loading.set(true);
    error.set(None);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_catalog(content_type).await {
            Ok(items) => catalogue.set(items),
            Err(e) => {
                log::warn!("catalog fetch failed: {e}");
                catalogue.set(Vec::new());
                error.set(Some(format!("Failed to load {}: {e}", content_type.label())));
            }
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (content_type, catalogue);
}

#[component]
pub fn ContentPage() -> impl IntoView {
    let page = use_page_state(content_page_options());
    let catalogue = RwSignal::new(Vec::<Content>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let on_add = watchlist_add_callback(notice);

    let content_type = Memo::new(move |_| page.with(|s| s.content_type));
    Effect::new(move || load_catalog(content_type.get(), catalogue, loading, error));

    let visible = Memo::new(move |_| page.with(|s| catalogue.with(|items| s.visible(items))));
    let genres = Memo::new(move |_| catalogue.with(|items| genre_options(items)));
    let years = Memo::new(move |_| catalogue.with(|items| year_options(items)));
    let current_page = Signal::derive(move || page.with(|s| s.current_page));
    let pages = Signal::derive(move || total_pages(visible.with(Vec::len)));

    let on_page = Callback::new(move |next: usize| page.update(|s| s.current_page = next));

    view! {
        <PageShell title="Browse">
            <div class="content-page">
                <div class="tabs">
                    {ContentType::ALL
                        .into_iter()
                        .map(|ct| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || content_type.get() == ct
                                    on:click=move |_| page.update(|s| s.select_content_type(ct))
                                >
                                    {ct.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="filters">
                    <select
                        class="filters__genre"
                        prop:value=move || page.with(|s| s.selected_genre.clone())
                        on:change=move |ev| {
                            let genre = event_target_value(&ev);
                            page.update(|s| {
                                s.selected_genre = genre;
                                s.current_page = 1;
                            });
                        }
                    >
                        <option value="">"All genres"</option>
                        {move || {
                            genres
                                .get()
                                .into_iter()
                                .map(|genre| {
                                    let label = genre.clone();
                                    view! { <option value=genre>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    <select
                        class="filters__year"
                        prop:value=move || page.with(|s| s.selected_year.clone())
                        on:change=move |ev| {
                            let year = event_target_value(&ev);
                            page.update(|s| {
                                s.selected_year = year;
                                s.current_page = 1;
                            });
                        }
                    >
                        <option value="">"All years"</option>
                        {move || {
                            years
                                .get()
                                .into_iter()
                                .map(|year| {
                                    let value = year.to_string();
                                    view! { <option value=value>{year}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    <label class="filters__rating">
                        {move || format!("Min rating {:.1}", page.with(|s| s.min_rating))}
                        <input
                            type="range"
                            min="0"
                            max="10"
                            step="0.5"
                            prop:value=move || page.with(|s| s.min_rating.to_string())
                            on:change=move |ev| {
                                let min_rating = event_target_value(&ev).parse().unwrap_or(0.0);
                                page.update(|s| {
                                    s.min_rating = min_rating;
                                    s.current_page = 1;
                                });
                            }
                        />
                    </label>
                    <select
                        class="filters__sort"
                        prop:value=move || page.with(|s| s.sort_by.clone())
                        on:change=move |ev| {
                            let sort_by = event_target_value(&ev);
                            page.update(|s| s.sort_by = sort_by);
                        }
                    >
                        {SORT_OPTIONS
                            .iter()
                            .map(|(key, label)| view! { <option value=*key>{*label}</option> })
                            .collect_view()}
                    </select>
                    <button class="btn filters__reset" on:click=move |_| page.update(|s| s.reset_filters())>
                        "Reset filters"
                    </button>
                </div>

                <Show when=move || notice.get().is_some()>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="error">
                        {move || error.get().unwrap_or_default()}
                        <button class="btn" on:click=move |_| load_catalog(content_type.get_untracked(), catalogue, loading, error)>
                            "Retry"
                        </button>
                    </p>
                </Show>

                <Show when=move || !loading.get() fallback=|| view! { <p>"Loading..."</p> }>
                    <p class="content-page__count">{move || format!("{} titles", visible.with(Vec::len))}</p>
                    <div class="content-grid">
                        {move || {
                            visible
                                .with(|items| paginate(items, current_page.get()).to_vec())
                                .into_iter()
                                .map(|content| view! { <ContentCard content=content on_add=on_add/> })
                                .collect_view()
                        }}
                    </div>
                    <Show when=move || visible.with(Vec::is_empty) && error.get().is_none()>
                        <p class="empty">"No titles match these filters."</p>
                    </Show>
                </Show>
                <Pager page=current_page total_pages=pages on_change=on_page/>
            </div>
        </PageShell>
    }
}
