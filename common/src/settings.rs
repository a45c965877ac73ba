use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Shown on the error page when a route cannot be computed.
pub const DEFAULT_ERROR_MESSAGE: &str = "We have encountered an error. Please try again. \
If the problem persists please contact use at +1 (855) 980 5669.";

/// Tunables shared by the UI and the CLI. Every field has a default, so a
/// settings file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// City name that always fails route computation (demo error path).
    pub sentinel_city: String,
    pub error_message: String,
    /// Quiet period after the last keystroke before a city search runs.
    pub search_debounce_ms: u32,
    /// How long the results view shows its loading placeholder.
    pub results_delay_ms: u32,
    pub form_route: String,
    pub results_route: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sentinel_city: "Dijon".into(),
            error_message: DEFAULT_ERROR_MESSAGE.into(),
            search_debounce_ms: 500,
            results_delay_ms: 2500,
            form_route: "/home".into(),
            results_route: "/results".into(),
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn is_sentinel(&self, city: &str) -> bool {
        city == self.sentinel_city
    }

    /// `route` with `query` appended, e.g. "/home?passengers=2".
    pub fn link(route: &str, query: &str) -> String {
        if query.is_empty() {
            route.to_string()
        } else {
            format!("{route}?{query}")
        }
    }
}
