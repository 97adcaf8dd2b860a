//! Weather gateway.
//!
//! Resolves a free-text place name to coordinates, then fetches current
//! conditions and normalizes them into a [`WeatherSnapshot`]. Every lookup is
//! fresh: nothing is cached and failed calls are not retried.
//!
//! Without a configured credential the gateway follows
//! [`WeatherPolicy`]: either it returns [`WeatherSnapshot::placeholder`] (and
//! logs a warning) or it fails with a configuration error.

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    config::{WeatherConfig, WeatherPolicy, OPENWEATHER_API_KEY},
    error::{Result, YatraError},
    models::WeatherSnapshot,
};

pub mod openweather;
pub mod upstream;

pub use openweather::OpenWeatherClient;
pub use upstream::{RawConditions, WeatherUpstream};

#[derive(Clone)]
pub struct WeatherGateway {
    upstream: Option<Arc<dyn WeatherUpstream>>,
    policy: WeatherPolicy,
}

impl WeatherGateway {
    /// Gateway backed by OpenWeather when a key is configured.
    pub fn from_config(config: &WeatherConfig) -> Self {
        let upstream = config.api_key.as_ref().map(|key| {
            Arc::new(OpenWeatherClient::new(key, &config.base_url)) as Arc<dyn WeatherUpstream>
        });
        Self {
            upstream,
            policy: config.policy,
        }
    }

    /// Gateway backed by an arbitrary upstream.
    pub fn with_upstream(upstream: Arc<dyn WeatherUpstream>, policy: WeatherPolicy) -> Self {
        Self {
            upstream: Some(upstream),
            policy,
        }
    }

    /// Gateway with no upstream at all.
    pub fn unconfigured(policy: WeatherPolicy) -> Self {
        Self {
            upstream: None,
            policy,
        }
    }

    pub fn is_live(&self) -> bool {
        self.upstream.is_some()
    }

    /// Current conditions at `location`.
    ///
    /// # Errors
    ///
    /// - `YatraError::Validation` if `location` is empty
    /// - `YatraError::Configuration` if no credential is set under the
    ///   strict policy
    /// - `YatraError::LocationNotFound` if geocoding returns no match; the
    ///   conditions endpoint is not called in that case
    /// - `YatraError::UpstreamUnavailable` if either upstream call fails
    pub async fn lookup(&self, location: &str) -> Result<WeatherSnapshot> {
        let location = location.trim();
        if location.is_empty() {
            return Err(YatraError::validation("location").with_reason("must not be empty"));
        }

        let Some(upstream) = &self.upstream else {
            return match self.policy {
                WeatherPolicy::Placeholder => {
                    warn!(
                        "{OPENWEATHER_API_KEY} is not set; using placeholder weather for {location}"
                    );
                    Ok(WeatherSnapshot::placeholder(location))
                }
                WeatherPolicy::Strict => Err(YatraError::configuration(format!(
                    "{OPENWEATHER_API_KEY} is not set and the weather policy is strict"
                ))),
            };
        };

        let matches = upstream.geocode(location).await?;
        let Some(coordinates) = matches.first().copied() else {
            return Err(YatraError::LocationNotFound {
                location: location.to_string(),
            });
        };
        debug!(
            "Resolved {location} to ({}, {})",
            coordinates.lat, coordinates.lon
        );

        let raw = upstream.current_conditions(coordinates).await?;
        Ok(raw.into_snapshot(location))
    }
}
