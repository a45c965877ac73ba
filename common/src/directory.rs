use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cities::CITY_COORDINATES;
use crate::error::SearchFailure;
use crate::location::GeoLocation;

/// A named city with its coordinates. Static reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub location: GeoLocation,
}

/// Lookup capability over the known cities.
///
/// Callers treat this as a black box: exact names resolve to coordinates and
/// partial strings resolve to matching names.
pub trait CityDirectory {
    /// Exact, case-sensitive match on the city name.
    fn resolve(&self, name: &str) -> Option<City>;

    /// Case-insensitive substring search over city names, in table order.
    /// The query is matched as typed, surrounding spaces included. Returns an
    /// empty list when nothing matches or the query is blank.
    fn search(&self, query: &str) -> Result<Vec<String>, SearchFailure>;
}

/// In-process directory backed by the built-in city table.
#[derive(Debug, Clone)]
pub struct StaticCityDirectory {
    index: HashMap<&'static str, usize>,
}

impl StaticCityDirectory {
    pub fn new() -> Self {
        let index = CITY_COORDINATES
            .iter()
            .enumerate()
            .map(|(idx, (name, _, _))| (*name, idx))
            .collect();
        Self { index }
    }

    /// Every city name, in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        CITY_COORDINATES.iter().map(|(name, _, _)| *name)
    }

    pub fn len(&self) -> usize {
        CITY_COORDINATES.len()
    }

    pub fn is_empty(&self) -> bool {
        CITY_COORDINATES.is_empty()
    }
}

impl Default for StaticCityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CityDirectory for StaticCityDirectory {
    fn resolve(&self, name: &str) -> Option<City> {
        self.index.get(name).map(|&idx| {
            let (name, lat, lon) = CITY_COORDINATES[idx];
            City {
                name: name.to_string(),
                location: GeoLocation::new(lat, lon),
            }
        })
    }

    fn search(&self, query: &str) -> Result<Vec<String>, SearchFailure> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(self
            .names()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect())
    }
}
