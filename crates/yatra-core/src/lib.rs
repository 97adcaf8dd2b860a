//! Core library for the Yatra pilgrim companion.
//!
//! Plans trips to Srisailam: it generates itineraries through a generative
//! backend, produces weather-based safety alerts through a tool-augmented
//! flow, translates short phrases into Telugu and answers voice queries.
//!
//! # Architecture
//!
//! - **Contracts** ([`contract`]): typed input/output shape of every
//!   generation operation, with runtime validation and JSON schemas
//! - **Weather** ([`weather`]): place name to current conditions
//! - **Generation** ([`generation`]): prompt templates, the [`Generator`]
//!   backend trait and the contract-checked [`Invoker`]
//! - **Safety flow** ([`flow`]): request, execute the weather tool, resume,
//!   final alert
//! - **Facade** ([`companion`]): [`Companion`], the entry point used by the
//!   CLI and the MCP server
//! - **Display** ([`display`]): markdown formatting of every result
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use yatra_core::{CompanionBuilder, Config, SafetyAlertRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let companion = CompanionBuilder::new(Config::from_env()?).build()?;
//!
//! let alert = companion
//!     .safety_alerts_or_fallback(&SafetyAlertRequest::default())
//!     .await;
//! println!("{alert}");
//! # Ok(())
//! # }
//! ```

pub mod companion;
pub mod config;
pub mod contract;
pub mod display;
pub mod error;
pub mod flow;
pub mod generation;
pub mod models;
pub mod params;
pub mod weather;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use companion::{Companion, CompanionBuilder};
pub use config::{Config, ConfigBuilder, WeatherPolicy};
pub use contract::Operation;
pub use display::{DarshanGuide, EmergencySheet};
pub use error::{Result, YatraError};
pub use flow::{SafetyFlow, SafetyFlowState};
pub use generation::{
    GenerationRequest, GenerationResponse, Generator, Invoker, OpenAiGenerator, ScriptedGenerator,
    ToolDeclaration, ToolRequest,
};
pub use models::{
    ItineraryResult, ItinerarySchema, Language, NarrativeItinerary, SafetyAlert, SafetyStatus,
    StructuredItinerary, TranslationResult, TripPlan, VoiceReply, VoiceReplyKind,
    WeatherSnapshot,
};
pub use params::{
    DarshanQuery, SafetyAlertRequest, TranslationRequest, TripRequest, VoiceQuery, WeatherLookup,
};
pub use weather::{WeatherGateway, WeatherUpstream};
