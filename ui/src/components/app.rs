use std::rc::Rc;

use dioxus::prelude::*;

use trip_common::directory::StaticCityDirectory;
use trip_common::settings::Settings;

use super::home::Home;
use super::results::Results;

/// `query` is the raw query string; the trip parameters live there so a
/// link or a reload reproduces the same form and the same results.
#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[redirect("/", || Route::Home { query: String::new() })]
    #[route("/home?:..query")]
    Home { query: String },
    #[route("/results?:..query")]
    Results { query: String },
}

#[component]
pub fn App() -> Element {
    use_context_provider(Settings::default);
    use_context_provider(|| Rc::new(StaticCityDirectory::new()));

    rsx! { Router::<Route> {} }
}

#[component]
fn AppLayout() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "trip-app",
            header { class: "app-header",
                h1 {
                    onclick: move |_| { nav.push(Route::Home { query: String::new() }); },
                    "Trip Planner"
                }
                p { "Plan a road trip across France" }
            }
            main {
                Outlet::<Route> {}
            }
        }
    }
}
