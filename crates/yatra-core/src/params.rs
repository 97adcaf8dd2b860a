//! Parameter structures for companion operations
//!
//! These are the accepted input shapes of every operation. They are shared by
//! the CLI and the MCP server: the CLI converts its clap arguments into them,
//! the MCP server deserializes them straight from tool-call JSON. Each type
//! implements [`Validate`] for the constraints serde cannot express, and the
//! contract layer ([`crate::contract`]) reads them field by field from raw
//! JSON so that a failure names the offending field.

use std::fmt;

use jiff::{
    civil::DateTime,
    tz::{Offset, TimeZone},
    Timestamp,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    contract::Validate,
    error::{Result, YatraError},
    models::Language,
};

/// Default destination for safety alerts and weather lookups.
pub const DESTINATION: &str = "Srisailam";

/// Srisailam local time is IST, UTC+05:30.
const DESTINATION_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

fn destination_tz() -> Result<TimeZone> {
    Offset::from_seconds(DESTINATION_OFFSET_SECONDS)
        .map(TimeZone::fixed)
        .map_err(|e| YatraError::configuration(format!("invalid destination offset: {e}")))
}

/// Parses an arrival time.
///
/// Accepts an RFC 3339 timestamp (`2024-05-01T16:00:00Z`,
/// `2024-05-01T21:30:00+05:30`) or a civil date-time without offset
/// (`2024-05-01T21:30`), which is taken as destination local time.
pub fn parse_arrival(raw: &str) -> Result<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let civil: DateTime = raw.parse().map_err(|e| {
        YatraError::validation("arrive_datetime")
            .with_reason(format!("expected an ISO-8601 date-time, got '{raw}': {e}"))
    })?;
    let zoned = civil.to_zoned(destination_tz()?).map_err(|e| {
        YatraError::validation("arrive_datetime").with_reason(format!("'{raw}': {e}"))
    })?;
    Ok(zoned.timestamp())
}

/// Coarse time of day, used to condition the first scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfDay {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PartOfDay {
    pub fn from_hour(hour: i8) -> Self {
        match hour {
            4..=7 => PartOfDay::EarlyMorning,
            8..=11 => PartOfDay::Morning,
            12..=16 => PartOfDay::Afternoon,
            17..=20 => PartOfDay::Evening,
            _ => PartOfDay::Night,
        }
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartOfDay::EarlyMorning => "early morning",
            PartOfDay::Morning => "morning",
            PartOfDay::Afternoon => "afternoon",
            PartOfDay::Evening => "evening",
            PartOfDay::Night => "night",
        };
        f.write_str(s)
    }
}

/// Parameters for generating an itinerary.
///
/// Immutable once built; consumed once by the generation call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TripRequest {
    /// The starting location of the trip (city or GPS coordinates)
    pub from: String,
    /// The arrival date and time at Srisailam (ISO-8601)
    #[schemars(with = "String")]
    pub arrive_datetime: Timestamp,
    /// The number of people in the group (at least 1)
    pub group_size: u32,
    /// The name of the hotel, if one has been chosen
    #[serde(default)]
    pub hotel: Option<String>,
    /// The preferred language for the itinerary
    pub language: Language,
    /// A short summary of weather alerts, if any
    #[serde(default)]
    pub weather_alerts: Option<String>,
}

impl TripRequest {
    /// Arrival hour bucket in destination local time.
    pub fn arrival_part_of_day(&self) -> Result<PartOfDay> {
        let local = self.arrive_datetime.to_zoned(destination_tz()?);
        Ok(PartOfDay::from_hour(local.hour()))
    }

    /// Arrival rendered in destination local time, e.g.
    /// `2024-05-01 21:30 IST`.
    pub fn arrival_local(&self) -> Result<String> {
        let local = self.arrive_datetime.to_zoned(destination_tz()?);
        Ok(format!("{} IST", local.strftime("%Y-%m-%d %H:%M")))
    }
}

impl Validate for TripRequest {
    fn validate(&self) -> Result<()> {
        if self.from.trim().is_empty() {
            return Err(YatraError::validation("from").with_reason("must not be empty"));
        }
        if self.group_size == 0 {
            return Err(YatraError::validation("group_size").with_reason("must be at least 1"));
        }
        if self.hotel.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(
                YatraError::validation("hotel").with_reason("must be null or a non-empty name")
            );
        }
        Ok(())
    }
}

/// Parameters for fetching safety alerts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SafetyAlertRequest {
    /// The location to get weather alerts for (e.g., "Srisailam")
    pub location: String,
}

impl SafetyAlertRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Default for SafetyAlertRequest {
    fn default() -> Self {
        Self::new(DESTINATION)
    }
}

impl Validate for SafetyAlertRequest {
    fn validate(&self) -> Result<()> {
        non_empty("location", &self.location)
    }
}

/// Parameters for translating a phrase into Telugu.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The short phrase to translate
    pub phrase: String,
}

impl Validate for TranslationRequest {
    fn validate(&self) -> Result<()> {
        non_empty("phrase", &self.phrase)
    }
}

/// Parameters for a transcribed voice query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceQuery {
    /// The transcribed text from the user's voice query
    pub transcribed_text: String,
    /// The language of the user's query
    pub language: Language,
    /// User trip details (from, dates, hotel if chosen)
    #[serde(default)]
    pub trip_details: Option<String>,
    /// Current weather and road alerts
    #[serde(default)]
    pub current_alerts: Option<String>,
}

impl Validate for VoiceQuery {
    fn validate(&self) -> Result<()> {
        non_empty("transcribedText", &self.transcribed_text)
    }
}

/// Parameters for a direct weather lookup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WeatherLookup {
    /// Free-text place name
    pub location: String,
}

impl Validate for WeatherLookup {
    fn validate(&self) -> Result<()> {
        non_empty("location", &self.location)
    }
}

/// Parameters for browsing the darshan FAQ.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DarshanQuery {
    /// FAQ id or a keyword from the question; all entries when absent
    #[serde(default)]
    pub query: Option<String>,
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(YatraError::validation(field).with_reason("must not be empty"))
    } else {
        Ok(())
    }
}
