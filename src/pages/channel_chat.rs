//! Chat view for a single channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from the channel directory at `/channels/:id`. Messages are polled
//! on a fixed interval while the page is mounted; posting a message refreshes
//! immediately.

#[cfg(test)]
#[path = "channel_chat_test.rs"]
mod channel_chat_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::page_shell::PageShell;
use crate::net::types::{Channel, CreateMessageRequest, Message, User};
use crate::state::auth::AuthState;

/// Delay between message refreshes.
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Message body to post, or `None` when there is nothing but whitespace.
pub fn validate_message(text: &str) -> Option<CreateMessageRequest> {
    let content = text.trim();
    (!content.is_empty()).then(|| CreateMessageRequest { content: content.to_owned(), parent_message_id: None })
}

/// Whether `user` may delete other people's messages.
pub fn is_moderator(user: &User) -> bool {
    user.roles.iter().any(|r| r == "ROLE_MODERATOR" || r == "ROLE_ADMIN")
}

/// `HH:MM` from an ISO 8601 timestamp, or the raw value if it is shorter.
pub fn message_time(created_at: &str) -> &str {
    created_at.get(11..16).unwrap_or(created_at)
}

fn load_messages(channel_id: i64, messages: RwSignal<Vec<Message>>, error: RwSignal<Option<String>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_messages(channel_id).await {
            Ok(list) => messages.set(list),
            Err(e) => error.set(Some(format!("Failed to load messages: {e}"))),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (channel_id, messages, error);
}

#[component]
pub fn ChannelChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let channel_id = Memo::new(move |_| params.read().get("id").and_then(|id| id.parse::<i64>().ok()));

    let channel = RwSignal::new(None::<Channel>);
    let messages = RwSignal::new(Vec::<Message>::new());
    let draft = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let posting = RwSignal::new(false);

    Effect::new(move || {
        let Some(id) = channel_id.get() else {
            error.set(Some("Unknown channel.".to_owned()));
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_channel(id).await {
                Ok(found) => channel.set(Some(found)),
                Err(e) => error.set(Some(format!("Failed to load channel: {e}"))),
            }
        });
        load_messages(id, messages, error);
    });

    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if let Some(id) = channel_id.get_untracked() {
                    load_messages(id, messages, error);
                }
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let moderator = move || auth.with(|a| a.user.as_ref().is_some_and(is_moderator));

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (Some(id), Some(request)) = (channel_id.get_untracked(), validate_message(&draft.get_untracked())) else {
            return;
        };
        posting.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_message(id, &request).await {
                Ok(_) => {
                    draft.set(String::new());
                    load_messages(id, messages, error);
                }
                Err(e) => error.set(Some(format!("Message not sent: {e}"))),
            }
            posting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, request);
    };

    let on_moderate = move |message_id: i64| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{ModerationTarget, moderate_delete};
            match moderate_delete(ModerationTarget::Message, message_id).await {
                Ok(()) => messages.update(|list| list.retain(|m| m.id != message_id)),
                Err(e) => error.set(Some(format!("Delete failed: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = message_id;
    };

    view! {
        <PageShell title="Channel">
            <div class="chat-page">
                <header class="chat-page__header">
                    <a class="btn" href="/channels">"‹ Channels"</a>
                    <h2>{move || channel.with(|c| c.as_ref().map(|c| c.name.clone()).unwrap_or_default())}</h2>
                    <p class="chat-page__description">
                        {move || channel.with(|c| c.as_ref().map(|c| c.description.clone()).unwrap_or_default())}
                    </p>
                </header>

                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <ul class="chat-messages">
                    {move || {
                        messages
                            .get()
                            .into_iter()
                            .map(|m| {
                                let id = m.id;
                                view! {
                                    <li class="chat-message" class:chat-message--moderated=m.moderated>
                                        <span class="chat-message__author">{m.username.clone()}</span>
                                        <span class="chat-message__time">{message_time(&m.created_at).to_owned()}</span>
                                        <p class="chat-message__content">{m.content.clone()}</p>
                                        <Show when=moderator>
                                            <button class="btn chat-message__delete" on:click=move |_| on_moderate(id)>
                                                "Delete"
                                            </button>
                                        </Show>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <Show when=move || messages.with(Vec::is_empty)>
                    <p class="empty">"No messages yet. Start the conversation!"</p>
                </Show>

                <form class="chat-form" on:submit=on_send>
                    <input
                        class="chat-form__input"
                        type="text"
                        placeholder="Write a message"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button
                        class="btn chat-form__send"
                        type="submit"
                        disabled=move || posting.get() || validate_message(&draft.get()).is_none()
                    >
                        "Send"
                    </button>
                </form>
            </div>
        </PageShell>
    }
}
