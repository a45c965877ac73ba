use serde::{Deserialize, Serialize};

use crate::directory::{City, CityDirectory};
use crate::error::RouteError;
use crate::location::{DistanceMetric, Haversine};

/// One consecutive leg of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSegment {
    pub city_one: String,
    pub city_two: String,
    /// Rounded to two decimals.
    pub distance_km: f64,
}

/// Resolves an ordered list of city names and measures each consecutive pair.
pub struct RouteCalculator<'a, D, M = Haversine> {
    directory: &'a D,
    metric: M,
    sentinel_city: Option<String>,
}

impl<'a, D: CityDirectory> RouteCalculator<'a, D, Haversine> {
    pub fn new(directory: &'a D) -> Self {
        Self::with_metric(directory, Haversine)
    }
}

impl<'a, D: CityDirectory, M: DistanceMetric> RouteCalculator<'a, D, M> {
    pub fn with_metric(directory: &'a D, metric: M) -> Self {
        Self {
            directory,
            metric,
            sentinel_city: None,
        }
    }

    /// A city name that fails the whole route before any lookup runs.
    pub fn with_sentinel(mut self, city: impl Into<String>) -> Self {
        self.sentinel_city = Some(city.into());
        self
    }

    /// Produce `names.len() - 1` segments in travel order.
    pub fn compute_route<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<DistanceSegment>, RouteError> {
        if let Some(sentinel) = &self.sentinel_city {
            if names.iter().any(|n| n.as_ref() == sentinel) {
                tracing::warn!("Route contains unavailable city {sentinel}");
                return Err(RouteError::UnknownCity(sentinel.clone()));
            }
        }
        if names.len() < 2 {
            return Err(RouteError::TooFewCities(names.len()));
        }

        let cities = names
            .iter()
            .map(|n| self.resolve(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities
            .windows(2)
            .map(|pair| DistanceSegment {
                city_one: pair[0].name.clone(),
                city_two: pair[1].name.clone(),
                distance_km: self.metric.distance_km(&pair[0].location, &pair[1].location),
            })
            .collect())
    }

    fn resolve(&self, name: &str) -> Result<City, RouteError> {
        self.directory.resolve(name).ok_or_else(|| {
            tracing::debug!("City {name:?} not found in directory");
            RouteError::UnknownCity(name.to_string())
        })
    }
}
