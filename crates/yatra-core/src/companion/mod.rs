//! High-level companion API.
//!
//! [`Companion`] is the single entry point the CLI and the MCP server call
//! through. It owns the generation [`Invoker`] and the [`WeatherGateway`] and
//! exposes every operation as an async method:
//!
//! ```text
//! ┌────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Companion    │    │ contract layer  │    │ Invoker /       │
//! │ (typed + named │───▶│ (validate input,│───▶│ SafetyFlow /    │
//! │  operations)   │    │  check output)  │    │ WeatherGateway  │
//! └────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Operations are request-scoped. Concurrent calls with identical input are
//! not merged: each one reaches the backend.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use yatra_core::{CompanionBuilder, Config, ScriptedGenerator, TranslationRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = ScriptedGenerator::new().then_output(json!({
//!     "teluguText": "నీళ్ళు ఎక్కడ దొరుకుతాయి?",
//!     "transliteration": "Neellu ekkada dorukutayi?",
//!     "ttsLang": "te-IN"
//! }));
//! let companion = CompanionBuilder::new(Config::default())
//!     .with_generator(Arc::new(generator))
//!     .build()?;
//!
//! let phrase = companion
//!     .translate_phrase(&TranslationRequest {
//!         phrase: "Where can I get drinking water?".to_string(),
//!     })
//!     .await?;
//! println!("{}", phrase.telugu_text);
//! # Ok(())
//! # }
//! ```

use std::{str::FromStr, sync::Arc};

use log::{error, info};
use serde_json::Value;

pub mod builder;


pub use builder::CompanionBuilder;

use crate::{
    config::{Config, OPENAI_API_KEY},
    contract::{
        output_schema, parse_input, NarrativeItineraryContract, Operation, SafetyAlertContract,
        StructuredItineraryContract, TranslationContract, Validate, VoiceQueryContract,
    },
    error::{Result, YatraError},
    flow::SafetyFlow,
    generation::Invoker,
    models::{
        ItineraryResult, ItinerarySchema, SafetyAlert, TranslationResult, TripPlan, VoiceReply,
        WeatherSnapshot,
    },
    params::{
        SafetyAlertRequest, TranslationRequest, TripRequest, VoiceQuery, WeatherLookup,
        DESTINATION,
    },
    weather::WeatherGateway,
};

/// Pilgrim trip companion.
///
/// Cheap to clone; clones share the backend and the gateway.
#[derive(Clone)]
pub struct Companion {
    config: Arc<Config>,
    invoker: Option<Invoker>,
    weather: WeatherGateway,
}

impl Companion {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn itinerary_schema(&self) -> ItinerarySchema {
        self.config.itinerary_schema
    }

    fn invoker(&self) -> Result<&Invoker> {
        self.invoker.as_ref().ok_or_else(|| {
            YatraError::configuration(format!(
                "{OPENAI_API_KEY} is not set; generation operations need a backend credential"
            ))
        })
    }

    /// Generates an itinerary in the configured shape.
    ///
    /// # Errors
    ///
    /// - `YatraError::Validation` if the request breaks a field constraint
    /// - `YatraError::Configuration` if no backend is configured
    /// - `YatraError::Generation` or `YatraError::SchemaMismatch` from the
    ///   backend call
    pub async fn generate_itinerary(&self, request: &TripRequest) -> Result<ItineraryResult> {
        request.validate()?;
        let invoker = self.invoker()?;
        info!(
            "Generating {} itinerary from {} for {} traveller(s)",
            self.config.itinerary_schema, request.from, request.group_size
        );
        match self.config.itinerary_schema {
            ItinerarySchema::V1 => invoker
                .generate::<NarrativeItineraryContract>(request)
                .await
                .map(ItineraryResult::Narrative),
            ItinerarySchema::V2 => invoker
                .generate::<StructuredItineraryContract>(request)
                .await
                .map(ItineraryResult::Structured),
        }
    }

    /// Fetches destination alerts, then generates an itinerary that takes
    /// them into account.
    ///
    /// The alert step never fails: if it cannot complete, the conservative
    /// [`SafetyAlert::unavailable`] alert is used. A caller-supplied
    /// `weather_alerts` is kept as is.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan> {
        request.validate()?;
        let alert = self
            .safety_alerts_or_fallback(&SafetyAlertRequest::new(DESTINATION))
            .await;

        let mut request = request.clone();
        if request.weather_alerts.is_none() {
            request.weather_alerts = Some(alert.summary.clone());
        }

        let itinerary = self.generate_itinerary(&request).await?;
        Ok(TripPlan { alert, itinerary })
    }

    /// Runs the tool-augmented safety-alert flow.
    ///
    /// # Errors
    ///
    /// Any error from the flow; see [`SafetyFlow::advance`].
    pub async fn safety_alerts(&self, request: &SafetyAlertRequest) -> Result<SafetyAlert> {
        request.validate()?;
        let invoker = self.invoker()?;
        info!("Getting safety alerts for {}", request.location);
        SafetyFlow::new(invoker, &self.weather).run(request).await
    }

    /// Like [`Companion::safety_alerts`] but never fails.
    pub async fn safety_alerts_or_fallback(&self, request: &SafetyAlertRequest) -> SafetyAlert {
        match self.safety_alerts(request).await {
            Ok(alert) => alert,
            Err(e) => {
                error!("Safety alerts for {} failed: {e}", request.location);
                SafetyAlert::unavailable()
            }
        }
    }

    pub async fn translate_phrase(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        request.validate()?;
        info!("Translating phrase to Telugu");
        self.invoker()?
            .generate::<TranslationContract>(request)
            .await
    }

    pub async fn voice_query(&self, query: &VoiceQuery) -> Result<VoiceReply> {
        query.validate()?;
        info!("Answering voice query in {}", query.language);
        self.invoker()?.generate::<VoiceQueryContract>(query).await
    }

    /// Current conditions, straight from the weather gateway.
    pub async fn weather(&self, lookup: &WeatherLookup) -> Result<WeatherSnapshot> {
        lookup.validate()?;
        self.weather.lookup(&lookup.location).await
    }

    /// Dynamic entry point: runs the operation named `operation` on a raw
    /// JSON input and returns its raw JSON output.
    ///
    /// # Errors
    ///
    /// `YatraError::Validation` with field `operation` for an unknown name;
    /// otherwise the errors of the named operation.
    pub async fn generate(&self, operation: &str, input: &Value) -> Result<Value> {
        let output = match Operation::from_str(operation)? {
            Operation::Itinerary => {
                let request = match self.config.itinerary_schema {
                    ItinerarySchema::V1 => parse_input::<NarrativeItineraryContract>(input)?,
                    ItinerarySchema::V2 => parse_input::<StructuredItineraryContract>(input)?,
                };
                serde_json::to_value(self.generate_itinerary(&request).await?)?
            }
            Operation::SafetyAlerts => {
                let request = parse_input::<SafetyAlertContract>(input)?;
                serde_json::to_value(self.safety_alerts(&request).await?)?
            }
            Operation::TranslatePhrase => {
                let request = parse_input::<TranslationContract>(input)?;
                serde_json::to_value(self.translate_phrase(&request).await?)?
            }
            Operation::VoiceQuery => {
                let query = parse_input::<VoiceQueryContract>(input)?;
                serde_json::to_value(self.voice_query(&query).await?)?
            }
        };
        Ok(output)
    }

    /// Output schema of a named operation, as sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns `YatraError::Serialization` if the schema cannot be converted
    /// to JSON.
    pub fn output_schema(&self, operation: Operation) -> Result<Value> {
        match operation {
            Operation::Itinerary => match self.config.itinerary_schema {
                ItinerarySchema::V1 => output_schema::<NarrativeItineraryContract>(),
                ItinerarySchema::V2 => output_schema::<StructuredItineraryContract>(),
            },
            Operation::SafetyAlerts => output_schema::<SafetyAlertContract>(),
            Operation::TranslatePhrase => output_schema::<TranslationContract>(),
            Operation::VoiceQuery => output_schema::<VoiceQueryContract>(),
        }
    }
}
