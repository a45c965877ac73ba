use dioxus::prelude::*;

use trip_common::directory::CityDirectory;
use trip_common::form::FieldId;
use trip_common::search::{CitySearch, DropdownKey, SearchStatus};

use super::trip_state::{use_directory, use_settings};

/// One destination input with its debounced search dropdown.
#[component]
pub fn CityInput(
    id: FieldId,
    label: String,
    value: String,
    error: Option<String>,
    removable: bool,
    on_select: EventHandler<String>,
    on_clear: EventHandler<()>,
    on_remove: EventHandler<()>,
) -> Element {
    let directory = use_directory();
    let debounce_ms = use_settings().search_debounce_ms;
    let mut search = use_signal(CitySearch::new);
    let mut text = use_signal(|| value.clone());

    use_effect(use_reactive!(|(value,)| {
        text.set(value);
    }));

    let oninput = move |evt: FormEvent| {
        let typed = evt.value();
        text.set(typed.clone());
        if typed.trim().is_empty() {
            search.write().cancel();
            on_clear.call(());
            return;
        }
        let Some(ticket) = search.write().input(&typed) else {
            return;
        };
        let directory = directory.clone();
        spawn(async move {
            #[cfg(target_family = "wasm")]
            gloo_timers::future::TimeoutFuture::new(debounce_ms).await;
            #[cfg(not(target_family = "wasm"))]
            let _ = debounce_ms;
            if !search.peek().is_current(&ticket) {
                return;
            }
            let result = directory.search(&ticket.query);
            search.write().resolve(&ticket, result);
        });
    };

    let onkeydown = move |evt: KeyboardEvent| {
        let key = match evt.key() {
            Key::ArrowDown => DropdownKey::ArrowDown,
            Key::ArrowUp => DropdownKey::ArrowUp,
            Key::Enter => DropdownKey::Enter,
            Key::Escape => DropdownKey::Escape,
            _ => return,
        };
        evt.prevent_default();
        let chosen = search.write().key(key);
        if let Some(city) = chosen {
            text.set(city.clone());
            on_select.call(city);
        }
    };

    let current = search.read();
    let open = current.is_open();
    let focused = current.focused();
    let status = current.status().clone();
    let empty_message = current.empty_message();
    drop(current);

    let dropdown = match status {
        SearchStatus::Idle => rsx! {},
        SearchStatus::Loading => rsx! { li { class: "dropdown-loading", "Searching..." } },
        SearchStatus::NoResults => rsx! {
            li { class: "dropdown-empty", "{empty_message.unwrap_or_default()}" }
        },
        SearchStatus::Failed(_) => rsx! {
            li { class: "dropdown-error", "Something went wrong while searching" }
        },
        SearchStatus::Results(items) => rsx! {
            for (idx, city) in items.into_iter().enumerate() {
                li {
                    key: "{city}",
                    class: if focused == Some(idx) { "dropdown-item focused" } else { "dropdown-item" },
                    onclick: {
                        let city = city.clone();
                        move |_| {
                            search.write().select(&city);
                            text.set(city.clone());
                            on_select.call(city.clone());
                        }
                    },
                    "{city}"
                }
            }
        },
    };

    rsx! {
        div { class: "form-group city-input", id: "{id}",
            label { "{label}" }
            div { class: "city-input-row",
                input {
                    r#type: "text",
                    value: "{text}",
                    autocomplete: "off",
                    oninput,
                    onkeydown,
                }
                if removable {
                    button {
                        class: "remove-destination",
                        onclick: move |_| on_remove.call(()),
                        "Remove"
                    }
                }
            }
            if open {
                ul { class: "city-dropdown", {dropdown} }
            }
            if let Some(err) = error {
                span { class: "field-error", "{err}" }
            }
        }
    }
}
