use std::fmt::Write;

use trip_common::results::{format_km, ResultsPage};
use trip_common::route::DistanceSegment;

/// Plain-text rendering of the results page.
pub fn results_page(page: &ResultsPage) -> String {
    let mut out = String::new();
    match page {
        ResultsPage::Loaded(result) => {
            for leg in result.legs() {
                let suffix = if leg.is_final { "  (final leg)" } else { "" };
                let _ = writeln!(out, "{} → {}  {}{suffix}", leg.from, leg.to, leg.distance);
            }
            let _ = writeln!(out, "{} is total distance", result.total_display());
            let _ = writeln!(out, "{} passengers", result.passengers_display());
            let _ = writeln!(out, "{}", result.date_display());
        }
        ResultsPage::Failed(view) => {
            let _ = writeln!(out, "{}", view.title);
            let _ = writeln!(out, "{}", view.message);
            let _ = writeln!(out, "Back: {}", view.retry_target);
        }
    }
    out
}

pub fn segments(segments: &[DistanceSegment]) -> String {
    let mut out = String::new();
    for s in segments {
        let _ = writeln!(out, "{} → {}: {}", s.city_one, s.city_two, format_km(s.distance_km));
    }
    out
}
