//! Top navigation bar with route links, theme toggle, and sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by every authenticated page. Reads the auth and theme signals from
//! context so it needs no props.

use leptos::prelude::*;

use crate::state::auth::{AuthState, sign_out};
use crate::util::storage::BrowserStorage;
use crate::util::theme::{self, ThemeMode};

/// `(href, label)` for each primary route.
pub const NAV_LINKS: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/content", "Browse"),
    ("/search", "Search"),
    ("/ai", "AI Picks"),
    ("/watchlist", "Watchlist"),
    ("/channels", "Channels"),
    ("/profile", "Profile"),
];

#[component]
pub fn Navigation() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let theme_mode = expect_context::<RwSignal<ThemeMode>>();

    let username = move || auth.get().user.map(|u| u.username).unwrap_or_default();

    let on_toggle_theme = move |_| {
        let next = theme::toggle(&BrowserStorage, theme_mode.get_untracked());
        theme_mode.set(next);
    };

    let on_logout = move |_| {
        sign_out(&BrowserStorage);
        auth.update(|a| a.user = None);
        #[cfg(feature = "hydrate")]
        {
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/login");
            }
        }
    };

    view! {
        <nav class="nav toolbar">
            <a class="nav__brand" href="/">"Discover"</a>
            <span class="toolbar__divider" aria-hidden="true"></span>
            {NAV_LINKS
                .iter()
                .map(|(href, label)| view! { <a class="nav__link" href=*href>{*label}</a> })
                .collect_view()}
            <span class="toolbar__spacer"></span>
            <button class="btn toolbar__dark-toggle" on:click=on_toggle_theme title="Toggle dark mode">
                {move || if theme_mode.get().is_dark() { "☀" } else { "☾" }}
            </button>
            <span class="toolbar__self">{username}</span>
            <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </nav>
    }
}
