use dioxus::prelude::*;

use trip_common::results::ErrorView;

#[component]
pub fn ErrorPanel(view: ErrorView) -> Element {
    rsx! {
        div { class: "error-view",
            h2 { "{view.title}" }
            p { "{view.message}" }
            Link { class: "retry", to: view.retry_target.clone(), "Back to search" }
        }
    }
}
