//! Data models produced by companion operations.
//!
//! Every model here is a request-scoped value: it is built from a backend
//! response (or an upstream weather reading), validated, handed to the caller
//! once and dropped. Nothing is cached or persisted. Display implementations
//! live in [`crate::display`] so these types stay plain data.
//!
//! Wire names follow the shapes the generation backend is asked to produce,
//! which is why some types use `camelCase` and others `snake_case`.

pub mod itinerary;
pub mod language;
pub mod reference;
pub mod safety;
pub mod translation;
pub mod voice;
pub mod weather;


pub use itinerary::{
    CalendarEvent, ItineraryEvent, ItineraryResult, ItinerarySchema, NarrativeItinerary,
    StructuredItinerary, TripPlan,
};
pub use language::Language;
pub use reference::{DarshanFaq, EmergencyContact, Hospital};
pub use safety::{SafetyAlert, SafetyStatus};
pub use translation::TranslationResult;
pub use voice::{VoiceReply, VoiceReplyKind};
pub use weather::{Coordinates, WeatherSnapshot};
