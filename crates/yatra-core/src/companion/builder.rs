//! Builder for creating and configuring Companion instances.

use std::sync::Arc;

use log::{info, warn};

use super::Companion;
use crate::{
    config::Config,
    error::Result,
    generation::{Generator, Invoker, OpenAiGenerator, PromptLibrary},
    weather::{WeatherGateway, WeatherUpstream},
};

/// Builder for creating and configuring Companion instances.
pub struct CompanionBuilder {
    config: Config,
    generator: Option<Arc<dyn Generator>>,
    weather_upstream: Option<Arc<dyn WeatherUpstream>>,
}

impl CompanionBuilder {
    /// Creates a builder from an already loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            generator: None,
            weather_upstream: None,
        }
    }

    /// Uses the given backend instead of the configured OpenAI one.
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Uses the given weather upstream instead of OpenWeather.
    pub fn with_weather_upstream(mut self, upstream: Arc<dyn WeatherUpstream>) -> Self {
        self.weather_upstream = Some(upstream);
        self
    }

    /// Builds the configured companion.
    ///
    /// Without an injected generator the OpenAI backend is used when
    /// `OPENAI_API_KEY` was configured. Otherwise the companion is built
    /// without a backend and every generation operation fails with
    /// `YatraError::Configuration`; reference and weather operations still
    /// work.
    ///
    /// # Errors
    ///
    /// Returns `YatraError::Template` if a prompt template fails to compile.
    pub fn build(self) -> Result<Companion> {
        let prompts = Arc::new(PromptLibrary::new()?);

        let generator = match self.generator {
            Some(generator) => Some(generator),
            None => match OpenAiGenerator::from_config(&self.config.generation) {
                Ok(generator) => Some(Arc::new(generator) as Arc<dyn Generator>),
                Err(e) => {
                    warn!("Generation backend unavailable: {e}");
                    None
                }
            },
        };
        let invoker = generator.map(|generator| Invoker::new(generator, prompts));

        let weather = match self.weather_upstream {
            Some(upstream) => WeatherGateway::with_upstream(upstream, self.config.weather.policy),
            None => WeatherGateway::from_config(&self.config.weather),
        };

        info!(
            "Companion ready: model={}, itinerary schema={}, live weather={}",
            invoker.as_ref().map_or("none", Invoker::model_name),
            self.config.itinerary_schema,
            weather.is_live()
        );

        Ok(Companion {
            config: Arc::new(self.config),
            invoker,
            weather,
        })
    }
}
