use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::CityDirectory;
use crate::location::round_km;
use crate::query::TripQuery;
use crate::route::{DistanceSegment, RouteCalculator};
use crate::settings::Settings;

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Everything the results page shows for a successfully computed trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    pub segments: Vec<DistanceSegment>,
    pub total_km: f64,
    pub passengers: u32,
    pub date: NaiveDate,
}

impl TripResult {
    /// "783.97 km"
    pub fn total_display(&self) -> String {
        format_km(self.total_km)
    }

    pub fn passengers_display(&self) -> String {
        self.passengers.to_string()
    }

    /// "22 Jul 2023"
    pub fn date_display(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Rendering rows for each leg; the last one is the final leg.
    pub fn legs(&self) -> Vec<LegView<'_>> {
        let last = self.segments.len().saturating_sub(1);
        self.segments
            .iter()
            .enumerate()
            .map(|(idx, segment)| LegView {
                from: &segment.city_one,
                to: &segment.city_two,
                distance: format_km(segment.distance_km),
                is_final: idx == last,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegView<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub distance: String,
    pub is_final: bool,
}

/// Shown in place of results when the route cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    /// Back to the form, carrying the current query string.
    pub retry_target: String,
}

impl ErrorView {
    pub fn new(settings: &Settings, query: &str) -> Self {
        Self {
            title: "Oops! Something went wrong".into(),
            message: settings.error_message.clone(),
            retry_target: Settings::link(&settings.form_route, query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsPage {
    Loaded(TripResult),
    Failed(ErrorView),
}

/// Sum of already-rounded segment distances, rounded once more for display.
pub fn aggregate(segments: &[DistanceSegment]) -> f64 {
    round_km(segments.iter().map(|s| s.distance_km).sum())
}

pub fn format_km(km: f64) -> String {
    format!("{km:.2} km")
}

/// Display form of `date`, falling back to `today` when absent.
pub fn format_date_or(date: Option<NaiveDate>, today: NaiveDate) -> String {
    date.unwrap_or(today).format(DISPLAY_DATE_FORMAT).to_string()
}

/// Display form of `date`, falling back to the current local date.
#[cfg(feature = "std")]
pub fn format_date(date: Option<NaiveDate>) -> String {
    format_date_or(date, chrono::Local::now().date_naive())
}

/// Turns a trip query into what the results page displays.
pub struct ResultsAggregator<'a, D> {
    directory: &'a D,
    settings: &'a Settings,
}

impl<'a, D: CityDirectory> ResultsAggregator<'a, D> {
    pub fn new(directory: &'a D, settings: &'a Settings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    /// Compute the route for `trip`. `query` is the raw query string the
    /// error view's retry link should carry back to the form.
    pub fn build(&self, trip: &TripQuery, query: &str, today: NaiveDate) -> ResultsPage {
        let calculator =
            RouteCalculator::new(self.directory).with_sentinel(self.settings.sentinel_city.clone());
        match calculator.compute_route(&trip.destinations) {
            Ok(segments) => {
                let total_km = aggregate(&segments);
                tracing::info!(
                    "Computed {} legs totalling {total_km:.2} km",
                    segments.len()
                );
                ResultsPage::Loaded(TripResult {
                    segments,
                    total_km,
                    passengers: trip.passengers,
                    date: trip.date.unwrap_or(today),
                })
            }
            Err(err) => {
                tracing::warn!("Route failed: {err}");
                ResultsPage::Failed(ErrorView::new(self.settings, query))
            }
        }
    }

    /// Parse `query` and build the page for it.
    pub fn build_from_query(&self, query: &str, today: NaiveDate) -> ResultsPage {
        let query = query.strip_prefix('?').unwrap_or(query);
        self.build(&TripQuery::parse(query), query, today)
    }
}
