use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while turning a list of city names into distance segments.
///
/// These always surface as the full-page error view; there is no way to
/// recover from them without going back to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("a route needs at least two cities, got {0}")]
    TooFewCities(usize),
}

/// Inline problem with a single destination field. Blocks submission but
/// never affects other fields.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("You must choose a city")]
    Empty,
    #[error("{0} is not a known city")]
    UnknownCity(String),
    #[error("{0} is currently unavailable")]
    Unavailable(String),
}

/// The city search capability rejected a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("city search failed: {0}")]
pub struct SearchFailure(pub String);

/// Illegal edit of the destination list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("destination {0} is the origin or the final stop and cannot be removed")]
    FixedSlot(usize),
    #[error("destination index {index} is out of range for {len} destinations")]
    OutOfRange { index: usize, len: usize },
    #[error("no destination field with id {0}")]
    UnknownField(u32),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
