//! Channel directory: browse, create, join, leave, and delete channels.

#[cfg(test)]
#[path = "channels_test.rs"]
mod channels_test;

use leptos::prelude::*;

use crate::components::page_shell::PageShell;
use crate::net::types::{Channel, CreateChannelRequest};
use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelTab {
    #[default]
    All,
    Joined,
    Created,
}

impl ChannelTab {
    pub const ALL: [Self; 3] = [Self::All, Self::Joined, Self::Created];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Channels",
            Self::Joined => "Joined",
            Self::Created => "Created",
        }
    }

    pub fn includes(self, channel: &Channel, user_id: Option<i64>) -> bool {
        match self {
            Self::All => true,
            Self::Joined => channel.joined,
            Self::Created => user_id == Some(channel.created_by_id),
        }
    }
}

pub const SORT_OPTIONS: [(&str, &str); 6] = [
    ("name-asc", "Name (A-Z)"),
    ("name-desc", "Name (Z-A)"),
    ("members-desc", "Most members"),
    ("members-asc", "Fewest members"),
    ("date-desc", "Newest"),
    ("date-asc", "Oldest"),
];

/// Channels in `tab`, sorted by one of the [`SORT_OPTIONS`] keys.
pub fn visible_channels(channels: &[Channel], tab: ChannelTab, sort_by: &str, user_id: Option<i64>) -> Vec<Channel> {
    let mut out: Vec<Channel> = channels.iter().filter(|c| tab.includes(c, user_id)).cloned().collect();
    match sort_by {
        "name-asc" => out.sort_by_cached_key(|c| c.name.to_lowercase()),
        "name-desc" => out.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase())),
        "members-asc" => out.sort_by_key(|c| c.member_count),
        "members-desc" => out.sort_by_key(|c| std::cmp::Reverse(c.member_count)),
        "date-asc" => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        "date-desc" => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        _ => {}
    }
    out
}

/// # Errors
///
/// Returns the message to show when either field is blank.
pub fn validate_new_channel(name: &str, description: &str) -> Result<CreateChannelRequest, &'static str> {
    let (name, description) = (name.trim(), description.trim());
    if name.is_empty() || description.is_empty() {
        return Err("Enter a name and a description.");
    }
    Ok(CreateChannelRequest { name: name.to_owned(), description: description.to_owned() })
}

fn load_channels(channels: RwSignal<Vec<Channel>>, error: RwSignal<Option<String>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_channels().await {
            Ok(list) => channels.set(list),
            Err(e) => error.set(Some(format!("Failed to load channels: {e}"))),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (channels, error);
}

#[derive(Clone, Copy)]
enum Action {
    Join,
    Leave,
    Delete,
}

fn run_action(action: Action, channel_id: i64, channels: RwSignal<Vec<Channel>>, error: RwSignal<Option<String>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::api;
        let result = match action {
            Action::Join => api::join_channel(channel_id).await,
            Action::Leave => api::leave_channel(channel_id).await,
            Action::Delete => api::delete_channel(channel_id).await,
        };
        match result {
            Ok(()) => load_channels(channels, error),
            Err(e) => error.set(Some(e.to_string())),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (action, channel_id, channels, error);
}

#[component]
pub fn ChannelsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let channels = RwSignal::new(Vec::<Channel>::new());
    let error = RwSignal::new(None::<String>);
    let tab = RwSignal::new(ChannelTab::All);
    let sort_by = RwSignal::new("name-asc".to_owned());

    let show_create = RwSignal::new(false);
    let new_name = RwSignal::new(String::new());
    let new_description = RwSignal::new(String::new());

    load_channels(channels, error);

    let user_id = Memo::new(move |_| auth.with(|a| a.user.as_ref().map(|u| u.id)));
    let visible = Memo::new(move |_| {
        channels.with(|list| sort_by.with(|sort| visible_channels(list, tab.get(), sort, user_id.get())))
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match validate_new_channel(&new_name.get_untracked(), &new_description.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_channel(&request).await {
                Ok(created) => {
                    log::info!("created channel {}", created.id);
                    show_create.set(false);
                    new_name.set(String::new());
                    new_description.set(String::new());
                    error.set(None);
                    load_channels(channels, error);
                }
                Err(e) => error.set(Some(format!("Could not create channel: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    view! {
        <PageShell title="Channels">
            <div class="channels-page">
                <div class="toolbar">
                    <div class="tabs">
                        {ChannelTab::ALL
                            .into_iter()
                            .map(|t| {
                                let count = move || channels.with(|list| list.iter().filter(|c| t.includes(c, user_id.get())).count());
                                view! {
                                    <button
                                        class="tabs__tab"
                                        class:tabs__tab--active=move || tab.get() == t
                                        on:click=move |_| tab.set(t)
                                    >
                                        {move || format!("{} ({})", t.label(), count())}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    <span class="toolbar__spacer"></span>
                    <select
                        prop:value=move || sort_by.get()
                        on:change=move |ev| sort_by.set(event_target_value(&ev))
                    >
                        {SORT_OPTIONS
                            .iter()
                            .map(|(key, label)| view! { <option value=*key>{*label}</option> })
                            .collect_view()}
                    </select>
                    <button class="btn" on:click=move |_| show_create.update(|v| *v = !*v)>
                        "+ New Channel"
                    </button>
                </div>

                <Show when=move || show_create.get()>
                    <form class="channel-form" on:submit=on_create>
                        <input
                            type="text"
                            placeholder="Channel name"
                            prop:value=move || new_name.get()
                            on:input=move |ev| new_name.set(event_target_value(&ev))
                        />
                        <textarea
                            rows="3"
                            placeholder="What is this channel about?"
                            prop:value=move || new_description.get()
                            on:input=move |ev| new_description.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn" type="submit">"Create"</button>
                    </form>
                </Show>

                <Show when=move || error.get().is_some()>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <ul class="channel-list">
                    {move || {
                        visible
                            .get()
                            .into_iter()
                            .map(|channel| {
                                let id = channel.id;
                                let is_creator = user_id.get_untracked() == Some(channel.created_by_id);
                                let can_open = is_creator || channel.joined;
                                let joined = channel.joined;
                                view! {
                                    <li class="channel-card">
                                        <div class="channel-card__body">
                                            {if can_open {
                                                view! {
                                                    <a class="channel-card__name" href=format!("/channels/{id}")>
                                                        {channel.name.clone()}
                                                    </a>
                                                }
                                                    .into_any()
                                            } else {
                                                view! { <span class="channel-card__name">{channel.name.clone()}</span> }.into_any()
                                            }}
                                            <p class="channel-card__description">{channel.description.clone()}</p>
                                            <p class="channel-card__meta">
                                                {format!("{} members · by {}", channel.member_count, channel.created_by_username)}
                                            </p>
                                        </div>
                                        {if is_creator {
                                            view! {
                                                <button class="btn btn--danger" on:click=move |_| run_action(Action::Delete, id, channels, error)>
                                                    "Delete"
                                                </button>
                                            }
                                                .into_any()
                                        } else if joined {
                                            view! {
                                                <button class="btn" on:click=move |_| run_action(Action::Leave, id, channels, error)>
                                                    "Leave"
                                                </button>
                                            }
                                                .into_any()
                                        } else {
                                            view! {
                                                <button class="btn" on:click=move |_| run_action(Action::Join, id, channels, error)>
                                                    "Join"
                                                </button>
                                            }
                                                .into_any()
                                        }}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </div>
        </PageShell>
    }
}
