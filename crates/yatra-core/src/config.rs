//! Process-wide configuration, read once at startup.
//!
//! Nothing else in the crate reads the environment. [`Config::from_env`] is
//! called by the binary and the resulting value is handed to
//! [`crate::CompanionBuilder`]; tests build a [`Config`] directly through
//! [`ConfigBuilder`].

use std::{env, fmt, str::FromStr};

use crate::{
    error::{Result, YatraError},
    models::ItinerarySchema,
};

pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const OPENWEATHER_BASE_URL: &str = "OPENWEATHER_BASE_URL";
pub const WEATHER_POLICY: &str = "YATRA_WEATHER_POLICY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ITINERARY_SCHEMA: &str = "YATRA_ITINERARY_SCHEMA";

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_GENERATION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// What the weather gateway does when no upstream credential is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherPolicy {
    /// Return a fixed placeholder snapshot so dependent flows keep working
    #[default]
    Placeholder,
    /// Fail with a configuration error
    Strict,
}

impl FromStr for WeatherPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placeholder" => Ok(WeatherPolicy::Placeholder),
            "strict" => Ok(WeatherPolicy::Strict),
            _ => Err(format!("Invalid weather policy: {s}")),
        }
    }
}

impl fmt::Display for WeatherPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherPolicy::Placeholder => write!(f, "placeholder"),
            WeatherPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Weather upstream settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub policy: WeatherPolicy,
}

/// Generation backend settings.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GenerationConfig {
    /// Returns the credential or a configuration error naming the variable.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            YatraError::configuration(format!(
                "{OPENAI_API_KEY} is not set; generation operations need a backend credential"
            ))
        })
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Complete companion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub weather: WeatherConfig,
    pub generation: GenerationConfig,
    pub itinerary_schema: ItinerarySchema,
}

impl Config {
    /// Starts a builder with default settings and no credentials.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads every recognized variable from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `YatraError::Configuration` if a policy or schema variable
    /// holds an unrecognized value. Missing credentials are not an error
    /// here; they are checked where they are needed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = ConfigBuilder::new();
        if let Some(key) = non_empty(OPENWEATHER_API_KEY) {
            builder = builder.with_weather_api_key(key);
        }
        if let Some(url) = non_empty(OPENWEATHER_BASE_URL) {
            builder = builder.with_weather_base_url(url);
        }
        if let Some(policy) = non_empty(WEATHER_POLICY) {
            let policy = policy
                .parse::<WeatherPolicy>()
                .map_err(|e| YatraError::configuration(format!("{WEATHER_POLICY}: {e}")))?;
            builder = builder.with_weather_policy(policy);
        }
        if let Some(key) = non_empty(OPENAI_API_KEY) {
            builder = builder.with_generation_api_key(key);
        }
        if let Some(model) = non_empty(OPENAI_MODEL) {
            builder = builder.with_model(model);
        }
        if let Some(url) = non_empty(OPENAI_BASE_URL) {
            builder = builder.with_generation_base_url(url);
        }
        if let Some(schema) = non_empty(ITINERARY_SCHEMA) {
            let schema = schema
                .parse::<ItinerarySchema>()
                .map_err(|e| YatraError::configuration(format!("{ITINERARY_SCHEMA}: {e}")))?;
            builder = builder.with_itinerary_schema(schema);
        }
        Ok(builder.build())
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config {
                weather: WeatherConfig {
                    api_key: None,
                    base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
                    policy: WeatherPolicy::default(),
                },
                generation: GenerationConfig {
                    api_key: None,
                    model: DEFAULT_MODEL.to_string(),
                    base_url: DEFAULT_GENERATION_BASE_URL.to_string(),
                },
                itinerary_schema: ItinerarySchema::default(),
            },
        }
    }

    pub fn with_weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.weather.api_key = Some(key.into());
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.weather.base_url = url.into();
        self
    }

    pub fn with_weather_policy(mut self, policy: WeatherPolicy) -> Self {
        self.config.weather.policy = policy;
        self
    }

    pub fn with_generation_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.generation.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn with_generation_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.generation.base_url = url.into();
        self
    }

    pub fn with_itinerary_schema(mut self, schema: ItinerarySchema) -> Self {
        self.config.itinerary_schema = schema;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None).expect("empty env is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.weather.policy, WeatherPolicy::Placeholder);
        assert_eq!(config.itinerary_schema, ItinerarySchema::V2);
        assert!(config.weather.api_key.is_none());
        assert!(config.generation.require_api_key().is_err());
    }

    #[test]
    fn test_reads_recognized_variables() {
        let config = Config::from_lookup(lookup_from(&[
            (OPENWEATHER_API_KEY, "weather-key"),
            (WEATHER_POLICY, "Strict"),
            (OPENAI_API_KEY, "llm-key"),
            (OPENAI_MODEL, "gpt-4o"),
            (ITINERARY_SCHEMA, "v1"),
        ]))
        .expect("valid env");

        assert_eq!(config.weather.api_key.as_deref(), Some("weather-key"));
        assert_eq!(config.weather.policy, WeatherPolicy::Strict);
        assert_eq!(config.generation.require_api_key().ok(), Some("llm-key"));
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.itinerary_schema, ItinerarySchema::V1);
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let config =
            Config::from_lookup(lookup_from(&[(OPENWEATHER_API_KEY, "  ")])).expect("valid env");
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = Config::from_lookup(lookup_from(&[(WEATHER_POLICY, "lenient")])).unwrap_err();
        assert!(matches!(err, YatraError::Configuration { .. }));
    }

    #[test]
    fn test_debug_redacts_generation_key() {
        let config = ConfigBuilder::new().with_generation_api_key("secret").build();
        let debug = format!("{:?}", config.generation);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
