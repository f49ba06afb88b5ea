//! Login page with sign-in and registration forms.
//!
//! A successful sign-in stores the token, publishes the decoded user to the
//! auth context, and navigates home. Registration signs in immediately after.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::types::Credentials;
use crate::state::auth::AuthState;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate sign-in input; the username is trimmed.
///
/// # Errors
///
/// Returns the message to show when either field is empty.
pub fn validate_login(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

/// Validate registration input.
///
/// # Errors
///
/// Returns the first failing rule's message.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required");
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err("Username must be at least 3 characters");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    if confirm.is_empty() {
        return Err("Please confirm your password");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

#[cfg(feature = "hydrate")]
async fn sign_in_with(credentials: Credentials, auth: RwSignal<AuthState>) -> Result<(), String> {
    use crate::util::storage::BrowserStorage;

    let response = crate::net::api::login(&credentials).await.map_err(|e| e.to_string())?;
    let user = crate::state::auth::sign_in(&BrowserStorage, &response.token).map_err(|e| e.to_string())?;
    log::info!("signed in as {}", user.username);
    auth.set(AuthState { user: Some(user), loading: false });
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = leptos_router::hooks::use_navigate();

    let registering = RwSignal::new(false);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: skip the form.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_some() {
            navigate("/", leptos_router::NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let validated = if registering.get() {
            validate_registration(&username.get(), &password.get(), &confirm.get())
        } else {
            validate_login(&username.get(), &password.get())
        };
        let credentials = match validated {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(if registering.get() { "Creating account..." } else { "Signing in..." }.to_owned());

        #[cfg(feature = "hydrate")]
        {
            let register_first = registering.get();
            leptos::task::spawn_local(async move {
                if register_first {
                    if let Err(e) = crate::net::api::register(&credentials).await {
                        info.set(format!("Registration failed: {e}"));
                        busy.set(false);
                        return;
                    }
                }
                match sign_in_with(credentials, auth).await {
                    Ok(()) => info.set(String::new()),
                    Err(e) => info.set(format!("Sign in failed: {e}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = credentials;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Discover"</h1>
                <p class="login-card__subtitle">
                    {move || if registering.get() { "Create an account" } else { "Sign in" }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || registering.get()>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if registering.get() { "Register" } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button
                    class="btn login-toggle"
                    on:click=move |_| {
                        registering.update(|r| *r = !*r);
                        info.set(String::new());
                    }
                >
                    {move || {
                        if registering.get() { "Have an account? Sign in" } else { "New here? Create an account" }
                    }}
                </button>
            </div>
        </div>
    }
}
