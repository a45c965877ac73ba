//! End-to-end trip planning flows: form edits mirrored into the URL, a
//! submit, and the results view computed from that URL alone.

use std::cell::RefCell;
use std::time::Duration;

use trip_common::directory::{City, CityDirectory, StaticCityDirectory};
use trip_common::error::{RouteError, SearchFailure, ValidationError};
use trip_common::location::{DistanceMetric, GeoLocation};
use trip_common::query::TripQuery;
use trip_common::results::ResultsPage;
use trip_common::route::RouteCalculator;
use trip_common::search::{CitySearch, SearchStatus};
use trip_integration::harness::{debounced_search, TripSession};
use trip_integration::{init_tracing, ymd};

fn city(name: &str) -> City {
    StaticCityDirectory::new()
        .resolve(name)
        .unwrap_or_else(|| panic!("{name} missing from the city table"))
}

#[test]
fn distance_is_symmetric_across_the_table() {
    let dir = StaticCityDirectory::new();
    let names: Vec<_> = dir.names().collect();
    for a in &names {
        for b in &names {
            let (a, b) = (city(a).location, city(b).location);
            assert_eq!(a.distance_km(&b), b.distance_km(&a));
        }
    }
}

#[test]
fn paris_toulouse_montpellier_total() {
    let dir = StaticCityDirectory::new();
    let segments = RouteCalculator::new(&dir)
        .compute_route(&["Paris", "Toulouse", "Montpellier"])
        .unwrap();
    let total: f64 = segments.iter().map(|s| s.distance_km).sum();
    assert!((total - 783.98).abs() <= 0.011, "total was {total}");
}

#[test]
fn segment_count_and_reversal() {
    let dir = StaticCityDirectory::new();
    let calc = RouteCalculator::new(&dir);
    let route = ["Lille", "Paris", "Lyon", "Marseille", "Nice"];

    let forward = calc.compute_route(&route).unwrap();
    assert_eq!(forward.len(), route.len() - 1);

    let mut reversed = route;
    reversed.reverse();
    let backward = calc.compute_route(&reversed).unwrap();
    assert_eq!(backward.len(), forward.len());

    for (f, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(f.city_one, b.city_two);
        assert_eq!(f.city_two, b.city_one);
        assert_eq!(f.distance_km, b.distance_km);
    }
}

struct NeverMeasure;

impl DistanceMetric for NeverMeasure {
    fn distance_km(&self, _: &GeoLocation, _: &GeoLocation) -> f64 {
        panic!("distance must not be computed for a route with the unavailable city");
    }
}

struct NeverLookUp;

impl CityDirectory for NeverLookUp {
    fn resolve(&self, name: &str) -> Option<City> {
        panic!("lookup of {name} must not run for a route with the unavailable city");
    }

    fn search(&self, _: &str) -> Result<Vec<String>, SearchFailure> {
        Err(SearchFailure("not searchable".into()))
    }
}

#[test]
fn sentinel_short_circuits_before_any_collaborator_runs() {
    let calc = RouteCalculator::with_metric(&NeverLookUp, NeverMeasure).with_sentinel("Dijon");
    assert_eq!(
        calc.compute_route(&["Paris", "Dijon", "Montpellier"]),
        Err(RouteError::UnknownCity("Dijon".into()))
    );
}

#[test]
fn url_round_trips_through_interleaved_edits() {
    let mut session = TripSession::open("");
    let check = |session: &TripSession| {
        let reparsed = TripQuery::parse(&session.store.query_string());
        assert_eq!(reparsed, session.store.load(), "at {}", session.url());
    };

    session.choose(0, "Paris");
    check(&session);
    session.choose(1, "Nice");
    check(&session);

    session.add_waypoint();
    check(&session);
    session.add_waypoint();
    session.choose(2, "Lyon");
    check(&session);
    assert_eq!(session.store.load().destinations, vec!["Paris", "", "Lyon", "Nice"]);

    session.choose(1, "Dijon");
    session.remove(2);
    check(&session);
    assert_eq!(session.store.load().destinations, vec!["Paris", "Dijon", "Nice"]);

    session.remove(1);
    session.form.increment_passengers(&mut session.store);
    session.form.set_date(Some(ymd(2024, 2, 29)), &mut session.store);
    check(&session);

    let before = session.store.load();
    session.reload();
    assert_eq!(session.store.load(), before);
    assert_eq!(session.form.destinations(), vec!["Paris", "Nice"]);
    assert_eq!(session.form.passengers(), 2);
    assert_eq!(session.form.date(), Some(ymd(2024, 2, 29)));
}

#[test]
fn plan_a_trip_end_to_end() {
    let mut session = TripSession::open("");
    session.choose(0, "Paris");
    session.choose(1, "Montpellier");
    let waypoint = session.add_waypoint();
    session.choose(1, "Toulouse");
    assert_eq!(session.form.position(waypoint), Some(1));
    session.form.increment_passengers(&mut session.store);
    session.form.set_date(Some(ymd(2023, 7, 22)), &mut session.store);

    assert_eq!(
        session.url(),
        "/home?destinations=Paris%2CToulouse%2CMontpellier&passengers=2&date=2023-07-22"
    );

    let link = session.submit().expect("form should be valid");
    assert_eq!(
        link,
        "/results?destinations=Paris%2CToulouse%2CMontpellier&passengers=2&date=2023-07-22"
    );

    let ResultsPage::Loaded(result) = session.open_results(&link) else {
        panic!("expected a computed trip");
    };
    // Rounded legs 588.13 + 195.84; the 0.01 km tolerance around 783.98 applies.
    assert_eq!(result.total_display(), "783.97 km");
    assert_eq!(result.passengers_display(), "2");
    assert_eq!(result.date_display(), "22 Jul 2023");

    let legs = result.legs();
    assert_eq!(legs.len(), 2);
    assert_eq!((legs[0].from, legs[0].to), ("Paris", "Toulouse"));
    assert_eq!((legs[1].from, legs[1].to), ("Toulouse", "Montpellier"));
    assert!(legs[1].is_final);
}

#[test]
fn unavailable_city_shows_error_view() {
    let session = TripSession::open("");
    let query = "destinations=Paris%2CDijon%2CMontpellier&passengers=2&date=2023-07-22";
    let page = session.open_results(&format!("/results?{query}"));

    let ResultsPage::Failed(view) = &page else {
        panic!("expected the error view, got {page:?}");
    };
    assert_eq!(view.title, "Oops! Something went wrong");
    assert_eq!(view.retry_target, format!("/home?{query}"));

    let json = serde_json::to_value(&page).unwrap();
    assert!(json.get("segments").is_none());
    assert!(json.get("total_km").is_none());
}

#[test]
fn submit_is_blocked_by_inline_errors() {
    let mut session = TripSession::open("destinations=Paris%2CLyon");
    let cleared = session.clear(1);
    assert_eq!(cleared.to_string(), "You must choose a city");

    let errors = session.submit().unwrap_err();
    assert_eq!(errors, vec![(session.field_id(1), ValidationError::Empty)]);
    assert_eq!(session.form.fields()[0].error, None);

    session.choose(1, "Dijon");
    let errors = session.submit().unwrap_err();
    assert_eq!(
        errors,
        vec![(session.field_id(1), ValidationError::Unavailable("Dijon".into()))]
    );

    session.choose(1, "Nantes");
    assert!(session.submit().is_ok());
}

#[test]
fn legacy_date_in_url_is_understood() {
    let session = TripSession::open("");
    let ResultsPage::Loaded(result) =
        session.open_results("/results?destinations=Lyon%2CGrenoble&date=07-22-2023")
    else {
        panic!("expected a computed trip");
    };
    assert_eq!(result.date, ymd(2023, 7, 22));
    assert_eq!(result.passengers, 1);
}

#[test]
fn search_without_matches_reports_the_query() {
    let mut session = TripSession::open("");
    let id = session.field_id(0);
    let ticket = session.type_text(id, "Gotham").unwrap();
    assert!(session.finish_search(id, &ticket));
    assert_eq!(session.search_status(id), Some(&SearchStatus::NoResults));
}

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_the_debounce_window_collapse() {
    init_tracing();
    let dir = StaticCityDirectory::new();
    let search = RefCell::new(CitySearch::new());
    let debounce = Duration::from_millis(500);

    let first = debounced_search(&search, &dir, "Par", debounce, Duration::ZERO);
    let second = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        debounced_search(&search, &dir, "Mar", debounce, Duration::ZERO).await
    };
    let (first, second) = tokio::join!(first, second);

    assert!(!first);
    assert!(second);
    let search = search.borrow();
    assert_eq!(search.query(), "Mar");
    match search.status() {
        SearchStatus::Results(items) => assert!(items.iter().any(|c| c == "Marseille")),
        other => panic!("expected results, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_does_not_overwrite_newer_results() {
    init_tracing();
    let dir = StaticCityDirectory::new();
    let search = RefCell::new(CitySearch::new());
    let debounce = Duration::from_millis(500);

    // "Par" clears its debounce, then its response takes a full second.
    let slow = debounced_search(&search, &dir, "Par", debounce, Duration::from_secs(1));
    // "Mar" is typed while "Par" is in flight and answers immediately.
    let fast = async {
        tokio::time::sleep(Duration::from_millis(600)).await;
        debounced_search(&search, &dir, "Mar", debounce, Duration::ZERO).await
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(fast);
    assert!(!slow);
    let search = search.borrow();
    assert_eq!(search.query(), "Mar");
    match search.status() {
        SearchStatus::Results(items) => {
            assert!(items.iter().any(|c| c == "Marseille"));
            assert!(!items.iter().any(|c| c == "Paris"));
        }
        other => panic!("expected results, got {other:?}"),
    }
}
