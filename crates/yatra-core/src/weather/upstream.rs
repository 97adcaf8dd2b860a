use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::Result,
    models::{Coordinates, WeatherSnapshot},
};

/// Raw weather provider: a geocoder plus a current-conditions lookup.
///
/// Implementations map non-success responses to
/// `YatraError::UpstreamUnavailable` and perform no retries.
#[async_trait]
pub trait WeatherUpstream: Send + Sync {
    /// Candidate coordinates for a free-text place name, best match first.
    async fn geocode(&self, location: &str) -> Result<Vec<Coordinates>>;

    /// Current conditions at the given coordinates, metric units.
    async fn current_conditions(&self, coordinates: Coordinates) -> Result<RawConditions>;
}

/// Current-conditions payload as the upstream reports it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawConditions {
    #[serde(default)]
    pub name: String,
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub rain: Option<Rain>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MainReading {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConditionEntry {
    pub main: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Rain {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

impl RawConditions {
    /// Normalizes the payload. Missing rain reads as zero; a missing
    /// location name falls back to the name that was looked up.
    pub fn into_snapshot(self, requested: &str) -> WeatherSnapshot {
        let location = if self.name.trim().is_empty() {
            requested.to_string()
        } else {
            self.name
        };
        WeatherSnapshot {
            location,
            temperature: self.main.temp,
            condition: self
                .weather
                .into_iter()
                .next()
                .map(|entry| entry.main)
                .unwrap_or_else(|| "Unknown".to_string()),
            wind_speed: self.wind.map(|wind| wind.speed).unwrap_or(0.0),
            humidity: self.main.humidity,
            rain_volume: self.rain.and_then(|rain| rain.one_hour).unwrap_or(0.0),
        }
    }
}
