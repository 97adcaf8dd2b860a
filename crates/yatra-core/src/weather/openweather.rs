//! OpenWeather client: direct geocoding plus current weather.

use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::upstream::{RawConditions, WeatherUpstream};
use crate::{
    error::{Result, ResultExt, YatraError},
    models::Coordinates,
};

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .upstream_context("weather request failed")?;
        let response = ensure_success(response, path).await?;
        response
            .json()
            .await
            .upstream_context("could not decode weather response")
    }
}

async fn ensure_success(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let hint = if status == StatusCode::UNAUTHORIZED {
        " (check OPENWEATHER_API_KEY)"
    } else {
        ""
    };
    Err(YatraError::upstream(format!(
        "{path} returned {status}{hint}: {body}"
    )))
}

#[async_trait]
impl WeatherUpstream for OpenWeatherClient {
    async fn geocode(&self, location: &str) -> Result<Vec<Coordinates>> {
        self.get_json(
            "/geo/1.0/direct",
            &[("q", location.to_string()), ("limit", "1".to_string())],
        )
        .await
    }

    async fn current_conditions(&self, coordinates: Coordinates) -> Result<RawConditions> {
        self.get_json(
            "/data/2.5/weather",
            &[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
                ("units", "metric".to_string()),
            ],
        )
        .await
    }
}
