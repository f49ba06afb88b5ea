//! Profile page: view and edit the signed-in user's public profile.
//!
//! The profile is fetched from the server rather than read from the token's
//! claims. Saving publishes the updated fields to the auth context so the
//! navigation bar picks up a new username immediately.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::components::page_shell::PageShell;
use crate::net::types::{ProfileUpdate, UserProfile};
use crate::state::auth::AuthState;

/// Selectable avatars as `(id, emoji, name)`. The first is the default.
pub const AVATARS: [(&str, &str, &str); 12] = [
    ("1", "👤", "Default"),
    ("2", "🐱", "Cat"),
    ("3", "🐶", "Dog"),
    ("4", "🤖", "Robot"),
    ("5", "👽", "Alien"),
    ("6", "🥷", "Ninja"),
    ("7", "🧙", "Wizard"),
    ("8", "🧑‍🚀", "Astronaut"),
    ("9", "🏴‍☠️", "Pirate"),
    ("10", "⚔️", "Knight"),
    ("11", "🐉", "Dragon"),
    ("12", "🦄", "Unicorn"),
];

/// Emoji for a stored avatar id; unknown or missing ids get the default.
pub fn avatar_emoji(avatar: Option<&str>) -> &'static str {
    let (_, default, _) = AVATARS[0];
    avatar.and_then(|id| AVATARS.into_iter().find(|(key, _, _)| *key == id)).map_or(default, |(_, emoji, _)| emoji)
}

/// Whether notifications are on in a stored preferences blob. Anything other
/// than an explicit `false` counts as on.
pub fn notifications_enabled(preferences: Option<&str>) -> bool {
    preferences
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .and_then(|prefs| prefs.get("notifications").and_then(serde_json::Value::as_bool))
        .unwrap_or(true)
}

/// Editable copy of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub bio: String,
    pub avatar: String,
    pub notifications: bool,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let (default_avatar, _, _) = AVATARS[0];
        Self {
            username: profile.username.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            avatar: profile.avatar.clone().unwrap_or_else(|| default_avatar.to_owned()),
            notifications: notifications_enabled(profile.preferences.as_deref()),
        }
    }

    /// Update body for the server. The bio is sent even when empty so it can
    /// be cleared.
    ///
    /// # Errors
    ///
    /// Returns the message to show when the username is blank.
    pub fn to_update(&self) -> Result<ProfileUpdate, &'static str> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Username is required");
        }
        Ok(ProfileUpdate {
            username: Some(username.to_owned()),
            bio: Some(self.bio.trim().to_owned()),
            avatar: Some(self.avatar.clone()).filter(|a| !a.is_empty()),
            preferences: Some(serde_json::json!({ "notifications": self.notifications }).to_string()),
            profile_info: None,
        })
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let user_id = Memo::new(move |_| auth.with(|a| a.user.as_ref().map(|u| u.id)));

    let profile = RwSignal::new(None::<UserProfile>);
    let form = RwSignal::new(ProfileForm::default());
    let editing = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(id) = user_id.get() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_user_profile(id).await {
                Ok(found) => {
                    form.set(ProfileForm::from_profile(&found));
                    profile.set(Some(found));
                }
                Err(e) => error.set(Some(format!("Error loading profile: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    let on_edit = move |_| {
        if let Some(current) = profile.get_untracked() {
            form.set(ProfileForm::from_profile(&current));
        }
        error.set(None);
        editing.set(true);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = user_id.get_untracked() else {
            return;
        };
        let update = match form.with_untracked(ProfileForm::to_update) {
            Ok(update) => update,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        saving.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_user_profile(id, &update).await {
                Ok(saved) => {
                    auth.update(|a| {
                        if let Some(user) = &mut a.user {
                            user.apply_profile(&saved);
                        }
                    });
                    profile.set(Some(saved));
                    editing.set(false);
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Failed to save changes: {e}"))),
            }
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, update);
    };

    view! {
        <PageShell title="Profile">
            <div class="profile-page">
                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <Show
                    when=move || editing.get()
                    fallback=move || {
                        view! {
                            <section class="profile">
                                <span class="profile__avatar">
                                    {move || profile.with(|p| avatar_emoji(p.as_ref().and_then(|p| p.avatar.as_deref())))}
                                </span>
                                <h2 class="profile__name">
                                    {move || profile.with(|p| p.as_ref().map(|p| p.username.clone()).unwrap_or_default())}
                                </h2>
                                <p class="profile__email">
                                    {move || profile.with(|p| p.as_ref().map(|p| p.email.clone()).unwrap_or_default())}
                                </p>
                                <p class="profile__bio">
                                    {move || profile.with(|p| p.as_ref().and_then(|p| p.bio.clone()).unwrap_or_default())}
                                </p>
                                <p class="profile__prefs">
                                    {move || {
                                        let on = profile.with(|p| notifications_enabled(p.as_ref().and_then(|p| p.preferences.as_deref())));
                                        if on { "Notifications on" } else { "Notifications off" }
                                    }}
                                </p>
                                <button class="btn" on:click=on_edit disabled=move || profile.with(Option::is_none)>
                                    "Edit profile"
                                </button>
                            </section>
                        }
                    }
                >
                    <form class="profile-form" on:submit=on_save>
                        <label>
                            "Username"
                            <input
                                type="text"
                                prop:value=move || form.with(|f| f.username.clone())
                                on:input=move |ev| {
                                    let username = event_target_value(&ev);
                                    form.update(|f| f.username = username);
                                }
                            />
                        </label>
                        <label>
                            "Bio"
                            <textarea
                                prop:value=move || form.with(|f| f.bio.clone())
                                on:input=move |ev| {
                                    let bio = event_target_value(&ev);
                                    form.update(|f| f.bio = bio);
                                }
                            ></textarea>
                        </label>
                        <div class="avatar-picker">
                            {AVATARS
                                .into_iter()
                                .map(|(id, emoji, name)| {
                                    view! {
                                        <button
                                            type="button"
                                            class="avatar-picker__choice"
                                            class:avatar-picker__choice--active=move || form.with(|f| f.avatar == id)
                                            title=name
                                            on:click=move |_| form.update(|f| f.avatar = id.to_owned())
                                        >
                                            {emoji}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <label class="profile-form__toggle">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.notifications)
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    form.update(|f| f.notifications = on);
                                }
                            />
                            "Email notifications"
                        </label>
                        <div class="profile-form__actions">
                            <button class="btn" type="button" on:click=move |_| editing.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn" type="submit" disabled=move || saving.get()>
                                "Save"
                            </button>
                        </div>
                    </form>
                </Show>
            </div>
        </PageShell>
    }
}
