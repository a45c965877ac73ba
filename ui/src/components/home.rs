use dioxus::prelude::*;

use trip_common::form::FieldRole;
use trip_common::query::{format_date_param, parse_date};

use super::app::Route;
use super::city_input::CityInput;
use super::trip_state::{use_directory, use_settings, TripState};

/// Route component: the trip form, mounted from the URL.
#[component]
pub fn Home(query: String) -> Element {
    let settings = use_settings();
    let directory = use_directory();
    let nav = use_navigator();
    let mut trip = use_signal(|| TripState::from_query(&query));

    // Back/forward navigation hands us a different query; rebuild from it.
    use_effect(use_reactive!(|(query,)| {
        if trip.peek().query_string() != query {
            trip.set(TripState::from_query(&query));
        }
    }));

    let sync_url = move || {
        let query = trip.peek().query_string();
        nav.push(Route::Home { query });
    };

    let state = trip.read();
    let fields: Vec<_> = state
        .form
        .fields()
        .iter()
        .map(|f| {
            let role = state.form.role(f.id).unwrap_or(FieldRole::Waypoint);
            (f.id, role, f.value.clone(), f.error.as_ref().map(|e| e.to_string()))
        })
        .collect();
    let passengers = state.form.passengers();
    let can_decrement = state.form.can_decrement_passengers();
    let date_value = state.form.date().map(format_date_param).unwrap_or_default();
    drop(state);

    rsx! {
        div { class: "trip-form",
            for (id, role, value, error) in fields {
                CityInput {
                    key: "{id}",
                    id,
                    label: role.label().to_string(),
                    value,
                    error,
                    removable: role.removable(),
                    on_select: move |city: String| {
                        trip.write().select_city(id, &city);
                        sync_url();
                    },
                    on_clear: move |_| {
                        trip.write().clear_city(id);
                        sync_url();
                    },
                    on_remove: move |_| {
                        trip.write().remove_destination(id);
                        sync_url();
                    },
                }
            }

            button {
                class: "add-destination",
                onclick: move |_| { trip.write().add_destination(); },
                "Add destination"
            }

            div { class: "form-group passengers",
                label { "Passengers" }
                button {
                    disabled: !can_decrement,
                    onclick: move |_| {
                        trip.write().decrement_passengers();
                        sync_url();
                    },
                    "-"
                }
                span { class: "passenger-count", "{passengers}" }
                button {
                    onclick: move |_| {
                        trip.write().increment_passengers();
                        sync_url();
                    },
                    "+"
                }
            }

            div { class: "form-group date",
                label { "Date" }
                input {
                    r#type: "date",
                    value: "{date_value}",
                    oninput: move |evt| {
                        trip.write().set_date(parse_date(&evt.value()));
                        sync_url();
                    },
                }
            }

            button {
                class: "submit",
                onclick: move |_| {
                    let valid = trip.write().validate(&directory, &settings);
                    if valid {
                        let query = trip.peek().query_string();
                        nav.push(Route::Results { query });
                    }
                },
                "Submit"
            }
        }
    }
}
