//! Previous/next pager for paginated grids.

use leptos::prelude::*;

#[component]
pub fn Pager(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    on_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="pager">
                <button
                    class="btn pager__prev"
                    disabled=move || page.get() <= 1
                    on:click=move |_| on_change.run(page.get_untracked().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                <span class="pager__label">{move || format!("Page {} of {}", page.get(), total_pages.get())}</span>
                <button
                    class="btn pager__next"
                    disabled=move || page.get() >= total_pages.get()
                    on:click=move |_| on_change.run(page.get_untracked() + 1)
                >
                    "Next ›"
                </button>
            </div>
        </Show>
    }
}
