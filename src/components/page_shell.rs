//! Chrome shared by every authenticated page.
//!
//! Installs the unauthenticated redirect and renders the navigation bar above
//! the page body.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navigation::Navigation;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn PageShell(title: &'static str, children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <div class="page">
            <Navigation/>
            <main class="page__body">
                <header class="page__header">
                    <h1>{title}</h1>
                </header>
                {children()}
            </main>
        </div>
    }
}
