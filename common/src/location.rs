use serde::{Deserialize, Serialize};

/// Mean Earth radius used for every great-circle distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance in kilometers, rounded to two decimals.
    ///
    /// Rounding happens once, on the final kilometre value. Summing these
    /// rounded legs is what the results view displays, so the intermediate
    /// radians must stay unrounded.
    pub fn distance_km(&self, other: &GeoLocation) -> f64 {
        round_km(self.haversine_km(other))
    }

    /// Unrounded haversine distance in kilometers.
    pub fn haversine_km(&self, other: &GeoLocation) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Round a kilometre value to two decimals, half away from zero.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Something that can measure the distance between two points.
///
/// The route calculator takes this as a collaborator so the measurement can
/// be swapped out (or asserted never to run) in tests.
pub trait DistanceMetric {
    fn distance_km(&self, a: &GeoLocation, b: &GeoLocation) -> f64;
}

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, a: &GeoLocation, b: &GeoLocation) -> f64 {
        a.distance_km(b)
    }
}
