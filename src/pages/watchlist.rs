//! The user's watchlist with status tabs, a catalogue filter, and sorting.

use leptos::prelude::*;

use crate::components::page_shell::PageShell;
use crate::net::types::{ContentType, WatchlistItem, WatchlistStatus};
use crate::state::page_signal::use_page_state;
use crate::state::watchlist::{
    SORT_OPTIONS, STATUS_TABS, TypeFilter, display_title, tab_counts, watchlist_page_options,
};

fn load_watchlist(items: RwSignal<Vec<WatchlistItem>>, loading: RwSignal<bool>, error: RwSignal<Option<String>>) {
    loading.set(true);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_watchlist().await {
            Ok(list) => {
                items.set(list);
                error.set(None);
            }
            Err(e) => error.set(Some(format!("Failed to load watchlist: {e}"))),
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (items, error);
}

fn change_status(item_id: i64, status: WatchlistStatus, items: RwSignal<Vec<WatchlistItem>>, error: RwSignal<Option<String>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let request = crate::net::types::UpdateWatchlistItemRequest { id: item_id, status };
        match crate::net::api::update_watchlist_item(&request).await {
            Ok(updated) => items.update(|list| {
                if let Some(slot) = list.iter_mut().find(|i| i.id == updated.id) {
                    *slot = updated;
                }
            }),
            Err(e) => error.set(Some(format!("Update failed: {e}"))),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (item_id, status, items, error);
}

fn remove_item(item_id: i64, items: RwSignal<Vec<WatchlistItem>>, error: RwSignal<Option<String>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::remove_from_watchlist(item_id).await {
            Ok(()) => items.update(|list| list.retain(|i| i.id != item_id)),
            Err(e) => error.set(Some(format!("Remove failed: {e}"))),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (item_id, items, error);
}

#[component]
pub fn WatchlistPage() -> impl IntoView {
    let page = use_page_state(watchlist_page_options());
    let items = RwSignal::new(Vec::<WatchlistItem>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    load_watchlist(items, loading, error);

    let visible = Memo::new(move |_| page.with(|s| items.with(|list| s.visible(list))));
    let counts = Memo::new(move |_| items.with(|list| tab_counts(list)));

    view! {
        <PageShell title="Watchlist">
            <div class="watchlist-page">
                <div class="tabs">
                    {STATUS_TABS
                        .iter()
                        .enumerate()
                        .map(|(index, &(label, _))| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || page.with(|s| s.status_filter == index)
                                    on:click=move |_| page.update(|s| s.status_filter = index)
                                >
                                    {move || format!("{label} ({})", counts.get()[index])}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="filters">
                    <select
                        class="filters__type"
                        prop:value=move || page.with(|s| s.content_type_filter.as_str())
                        on:change=move |ev| {
                            let filter = TypeFilter::parse(&event_target_value(&ev)).unwrap_or_default();
                            page.update(|s| s.content_type_filter = filter);
                        }
                    >
                        <option value="ALL">"All types"</option>
                        {ContentType::ALL
                            .into_iter()
                            .map(|ct| view! { <option value=ct.as_str()>{ct.label()}</option> })
                            .collect_view()}
                    </select>
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
                    <span class="filters__total">{move || format!("Total: {} items", visible.with(Vec::len))}</span>
                </div>

                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || !loading.get() fallback=|| view! { <p>"Loading..."</p> }>
                    <ul class="watchlist">
                        {move || {
                            visible
                                .get()
                                .into_iter()
                                .map(|item| {
                                    let id = item.id;
                                    let title = display_title(&item);
                                    view! {
                                        <li class="watchlist__item">
                                            <span class="watchlist__title">{title}</span>
                                            <select
                                                class="watchlist__status"
                                                prop:value=item.status.as_str()
                                                on:change=move |ev| {
                                                    if let Some(status) = WatchlistStatus::parse(&event_target_value(&ev)) {
                                                        change_status(id, status, items, error);
                                                    }
                                                }
                                            >
                                                {WatchlistStatus::ALL
                                                    .into_iter()
                                                    .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                                    .collect_view()}
                                            </select>
                                            <button class="btn watchlist__remove" on:click=move |_| remove_item(id, items, error)>
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <Show when=move || visible.with(Vec::is_empty)>
                        <p class="empty">"Nothing here yet. Try adjusting your filters."</p>
                    </Show>
                </Show>
            </div>
        </PageShell>
    }
}
