//! Wire format of the trip state.
//!
//! The URL query string is the only place a trip is persisted:
//!
//! - `destinations`: city names joined with `,` in travel order
//!   (e.g. `Paris%2CToulouse%2CMontpellier` once URL-encoded).
//! - `passengers`: positive decimal integer, `1` when absent or unparsable.
//! - `date`: ISO `YYYY-MM-DD`. The legacy `MM-DD-YYYY` form is still read.
//!
//! City names never contain a comma, so the join is unambiguous.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const DESTINATIONS_KEY: &str = "destinations";
pub const PASSENGERS_KEY: &str = "passengers";
pub const DATE_KEY: &str = "date";

const DESTINATION_SEPARATOR: &str = ",";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const LEGACY_DATE_FORMAT: &str = "%m-%d-%Y";

/// The three trip parameters that live in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKey {
    Destinations,
    Passengers,
    Date,
}

impl QueryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKey::Destinations => DESTINATIONS_KEY,
            QueryKey::Passengers => PASSENGERS_KEY,
            QueryKey::Date => DATE_KEY,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, flat key/value pairs with `URLSearchParams` semantics.
///
/// Keys other than the trip keys are carried through untouched so foreign
/// parameters survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first occurrence of `key` in place and drop any others;
    /// append when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut idx = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = k != key || idx == first;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    /// URL-encoded form, without a leading `?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// Canonical trip state, decoded from (and encoded to) the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripQuery {
    /// At least two entries; empty strings are fields still being edited.
    pub destinations: Vec<String>,
    pub passengers: u32,
    /// `None` means "today", resolved by whoever displays it.
    pub date: Option<NaiveDate>,
}

impl Default for TripQuery {
    fn default() -> Self {
        Self {
            destinations: vec![String::new(), String::new()],
            passengers: 1,
            date: None,
        }
    }
}

impl TripQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            destinations: params
                .get(DESTINATIONS_KEY)
                .map(split_destinations)
                .unwrap_or_else(|| vec![String::new(), String::new()]),
            passengers: params
                .get(PASSENGERS_KEY)
                .map(parse_passengers)
                .unwrap_or(1),
            date: params.get(DATE_KEY).and_then(parse_date),
        }
    }

    pub fn parse(query: &str) -> Self {
        Self::from_params(&QueryParams::parse(query))
    }

    /// Write every field of the trip into `params`.
    pub fn write_to(&self, params: &mut QueryParams) {
        params.set(DESTINATIONS_KEY, join_destinations(&self.destinations));
        params.set(PASSENGERS_KEY, self.passengers.to_string());
        match self.date {
            Some(date) => params.set(DATE_KEY, format_date_param(date)),
            None => params.remove(DATE_KEY),
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut params = QueryParams::new();
        self.write_to(&mut params);
        params.to_string()
    }
}

/// Split a `destinations` value. Always yields at least two entries: a lone
/// origin gets an empty final destination appended.
pub fn split_destinations(raw: &str) -> Vec<String> {
    let mut destinations: Vec<String> = raw
        .split(DESTINATION_SEPARATOR)
        .map(str::to_string)
        .collect();
    while destinations.len() < 2 {
        destinations.push(String::new());
    }
    destinations
}

pub fn join_destinations<S: AsRef<str>>(destinations: &[S]) -> String {
    destinations
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DESTINATION_SEPARATOR)
}

/// Passenger counts below one, or that do not parse, fall back to one.
pub fn parse_passengers(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            tracing::warn!("Ignoring invalid passenger count {raw:?}");
            1
        }
    }
}

/// Accepts ISO `YYYY-MM-DD` or legacy `MM-DD-YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok();
    if parsed.is_none() && !raw.is_empty() {
        tracing::warn!("Ignoring unparsable date {raw:?}");
    }
    parsed
}

pub fn format_date_param(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
