//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    ai::AiPage, channel_chat::ChannelChatPage, channels::ChannelsPage, content::ContentPage,
    content_details::ContentDetailsPage, home::HomePage, login::LoginPage, profile::ProfilePage, search::SearchPage,
    watchlist::WatchlistPage,
};
use crate::state::auth::AuthState;
use crate::util::storage::BrowserStorage;
use crate::util::theme::{self, ThemeMode};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" data-theme="dark">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and theme contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let theme_mode = RwSignal::new(ThemeMode::default());
    provide_context(auth);
    provide_context(theme_mode);

    // Effects only run in the browser, after hydration.
    Effect::new(move || {
        auth.set(AuthState::restored(&BrowserStorage));
        let mode = theme::read_preference(&BrowserStorage);
        theme::apply(mode);
        theme_mode.set(mode);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/discover.css"/>
        <Title text="Discover"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("content") view=ContentPage/>
                <Route
                    path=(StaticSegment("content"), ParamSegment("id"), ParamSegment("type"))
                    view=ContentDetailsPage
                />
                <Route path=StaticSegment("search") view=SearchPage/>
                <Route path=StaticSegment("ai") view=AiPage/>
                <Route path=StaticSegment("watchlist") view=WatchlistPage/>
                <Route path=StaticSegment("channels") view=ChannelsPage/>
                <Route path=(StaticSegment("channels"), ParamSegment("id")) view=ChannelChatPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
