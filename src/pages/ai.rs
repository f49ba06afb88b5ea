//! Free-text recommendations.
//!
//! The description, type filter, and last recommendations persist under
//! `aiPageState`.

use leptos::prelude::*;

use crate::components::content_card::{ContentCard, watchlist_add_callback};
use crate::components::page_shell::PageShell;
use crate::net::types::ContentType;
use crate::state::ai::{AiPageState, ai_page_options};
use crate::state::page_signal::use_page_state;

#[component]
pub fn AiPage() -> impl IntoView {
    let page = use_page_state(ai_page_options());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let on_add = watchlist_add_callback(notice);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let request = match page.with_untracked(AiPageState::request) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        let description = request.description.clone();
        page.update(|s| s.description = description);
        loading.set(true);
        error.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_recommendations(&request).await {
                Ok(found) => page.update(|s| s.apply_recommendations(found)),
                Err(e) => error.set(Some(format!("Could not get recommendations: {e}"))),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_reset = move |_| {
        page.reset();
        error.set(None);
    };

    view! {
        <PageShell title="AI Picks">
            <div class="ai-page">
                <form class="ai-form" on:submit=on_submit>
                    <textarea
                        class="ai-form__description"
                        rows="4"
                        placeholder="Describe what you're in the mood for"
                        prop:value=move || page.with(|s| s.description.clone())
                        on:input=move |ev| {
                            let description = event_target_value(&ev);
                            page.update(|s| s.description = description);
                        }
                    ></textarea>
                    <select
                        class="ai-form__type"
                        prop:value=move || page.with(|s| s.content_type.map(ContentType::as_str).unwrap_or_default())
                        on:change=move |ev| {
                            let content_type = ContentType::parse(&event_target_value(&ev));
                            page.update(|s| s.content_type = content_type);
                        }
                    >
                        <option value="">"Any type"</option>
                        {ContentType::ALL
                            .into_iter()
                            .map(|ct| view! { <option value=ct.as_str()>{ct.label()}</option> })
                            .collect_view()}
                    </select>
                    <button class="btn ai-form__submit" type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Thinking..." } else { "Recommend" }}
                    </button>
                    <button class="btn ai-form__reset" type="button" on:click=on_reset>
                        "Start over"
                    </button>
                </form>

                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || notice.get().is_some()>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || page.with(|s| s.has_searched)>
                    <Show
                        when=move || page.with(|s| !s.recommendations.is_empty())
                        fallback=|| view! { <p class="empty">"No recommendations found. Try describing it differently."</p> }
                    >
                        <div class="content-grid">
                            {move || {
                                page.with(|s| s.recommendations.clone())
                                    .into_iter()
                                    .map(|content| view! { <ContentCard content=content on_add=on_add/> })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </Show>
            </div>
        </PageShell>
    }
}
