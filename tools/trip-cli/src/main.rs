//! Command-line front end for the trip planner.
//!
//! Everything the browser UI does can be driven from here against a query
//! string: compute results, search cities, measure a route, or apply form
//! edits and print the resulting URL parameters.

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trip_common::directory::{CityDirectory, StaticCityDirectory};
use trip_common::query::parse_date;
use trip_common::results::ResultsAggregator;
use trip_common::route::RouteCalculator;
use trip_common::settings::Settings;
use trip_common::store::QueryParamStore;

#[derive(Parser)]
#[command(name = "trip-cli", about = "Plan a trip and measure its legs", version)]
struct Cli {
    /// JSON settings file; unspecified fields keep their defaults.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Override the city that always fails route computation.
    #[arg(long, global = true)]
    sentinel: Option<String>,

    /// Date used when the query carries none (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the results page for a query string
    /// (e.g. "destinations=Paris%2CLyon&passengers=2").
    Results {
        query: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List cities whose name contains TEXT.
    Search { text: String },
    /// Measure each consecutive leg between the given cities.
    Route {
        #[arg(required = true, num_args = 2..)]
        cities: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Apply form edits to a query string and print the new one.
    Edit {
        /// Starting query string (may be empty).
        #[arg(default_value = "")]
        query: String,
        /// Insert empty waypoints before the final stop first.
        #[arg(long, default_value_t = 0)]
        add_waypoints: usize,
        /// INDEX=CITY, applied in order.
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(usize, String)>,
        /// Waypoint index to remove, applied after --set.
        #[arg(long)]
        remove: Vec<usize>,
        #[arg(long)]
        passengers: Option<u32>,
        /// YYYY-MM-DD, or "none" to clear.
        #[arg(long)]
        date: Option<String>,
    },
}

fn parse_assignment(raw: &str) -> Result<(usize, String), String> {
    let (index, city) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=CITY, got {raw:?}"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid index in {raw:?}"))?;
    Ok((index, city.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(sentinel) = &cli.sentinel {
        settings.sentinel_city = sentinel.clone();
    }
    tracing::debug!(?settings, "Loaded settings");
    Ok(settings)
}

fn today(cli: &Cli) -> Result<NaiveDate> {
    match &cli.today {
        Some(raw) => parse_date(raw).with_context(|| format!("invalid --today date {raw:?}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let directory = StaticCityDirectory::new();

    match &cli.command {
        Command::Results { query, json } => {
            let page = ResultsAggregator::new(&directory, &settings)
                .build_from_query(query, today(&cli)?);
            if *json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", render::results_page(&page));
            }
        }
        Command::Search { text } => {
            let matches = directory.search(text)?;
            if matches.is_empty() {
                println!("No results were found for {text}");
            }
            for name in matches {
                println!("{name}");
            }
        }
        Command::Route { cities, json } => {
            let segments = RouteCalculator::new(&directory)
                .with_sentinel(settings.sentinel_city.clone())
                .compute_route(cities)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                print!("{}", render::segments(&segments));
            }
        }
        Command::Edit {
            query,
            add_waypoints,
            assignments,
            remove,
            passengers,
            date,
        } => {
            let mut store = QueryParamStore::from_query(query);
            store.set_slot_count(store.slot_count() + add_waypoints);
            for (index, city) in assignments {
                store.set_destination(*index, city)?;
            }
            for index in remove {
                store.remove_destination(*index)?;
            }
            if let Some(count) = passengers {
                if *count == 0 {
                    bail!("passengers must be at least 1");
                }
                store.set_passengers(*count);
            }
            match date.as_deref() {
                Some("none") => store.set_date(None),
                Some(raw) => {
                    let parsed =
                        parse_date(raw).with_context(|| format!("invalid --date {raw:?}"))?;
                    store.set_date(Some(parsed));
                }
                None => {}
            }
            println!("{}", store.query_string());
        }
    }

    Ok(())
}
