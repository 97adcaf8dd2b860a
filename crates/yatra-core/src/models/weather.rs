//! Current weather conditions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geographic coordinates resolved from a place name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions at a location, produced fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeatherSnapshot {
    /// Location name as reported by the upstream
    pub location: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Short condition text, e.g. "Clear" or "Rain"
    pub condition: String,
    /// Wind speed in metres per second
    pub wind_speed: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Rain volume over the last hour in millimetres, zero when none reported
    pub rain_volume: f64,
}

impl WeatherSnapshot {
    /// Fixed reading used when no weather credential is configured and the
    /// placeholder policy is active.
    pub fn placeholder(location: &str) -> Self {
        Self {
            location: location.to_string(),
            temperature: 25.0,
            condition: "Clear".to_string(),
            wind_speed: 0.0,
            humidity: 60.0,
            rain_volume: 0.0,
        }
    }
}
