use dioxus::prelude::*;

use trip_common::results::{ResultsAggregator, ResultsPage};

use super::app::Route;
use super::error_view::ErrorPanel;
use super::trip_state::{use_directory, use_settings};

/// Route component: computes the trip described by the URL.
///
/// Shows a loading placeholder for the configured delay, then either the
/// legs and totals or the error view.
#[component]
pub fn Results(query: String) -> Element {
    let settings = use_settings();
    let directory = use_directory();
    let nav = use_navigator();
    let mut page = use_signal(|| None::<ResultsPage>);
    let mut pending = use_signal(|| None::<Task>);

    use_effect(use_reactive!(|(query,)| {
        if let Some(task) = pending.write().take() {
            task.cancel();
        }
        page.set(None);
        let directory = directory.clone();
        let settings = settings.clone();
        let today = chrono::Local::now().date_naive();
        let built = ResultsAggregator::new(&*directory, &settings).build_from_query(&query, today);
        if matches!(built, ResultsPage::Failed(_)) {
            page.set(Some(built));
            return;
        }
        let task = spawn(async move {
            #[cfg(target_family = "wasm")]
            gloo_timers::future::TimeoutFuture::new(settings.results_delay_ms).await;
            page.set(Some(built));
        });
        pending.set(Some(task));
    }));

    let back_query = query.clone();
    let back = move |_| {
        nav.push(Route::Home {
            query: back_query.clone(),
        });
    };

    match page.read().clone() {
        None => rsx! {
            div { class: "results loading",
                div { class: "placeholder-line" }
                div { class: "placeholder-line" }
                div { class: "placeholder-line short" }
            }
        },
        Some(ResultsPage::Failed(view)) => rsx! { ErrorPanel { view } },
        Some(ResultsPage::Loaded(result)) => {
            let legs: Vec<_> = result
                .legs()
                .into_iter()
                .map(|leg| {
                    (
                        leg.from.to_string(),
                        leg.to.to_string(),
                        leg.distance,
                        leg.is_final,
                    )
                })
                .collect();
            let total = result.total_display();
            let passengers = result.passengers_display();
            let date = result.date_display();
            rsx! {
                div { class: "results",
                    ol { class: "legs",
                        for (idx, (from, to, distance, is_final)) in legs.into_iter().enumerate() {
                            li {
                                key: "{idx}",
                                class: if is_final { "leg final" } else { "leg" },
                                span { class: "leg-from", "{from}" }
                                span { class: "leg-distance", "{distance}" }
                                span { class: "leg-to", "{to}" }
                            }
                        }
                    }
                    p { class: "total", strong { "{total}" } " is total distance" }
                    p { class: "passengers", strong { "{passengers}" } " passengers" }
                    p { class: "date", strong { "{date}" } }
                    button { onclick: back, "Back" }
                }
            }
        }
    }
}
