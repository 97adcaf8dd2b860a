//! Itinerary result shapes.
//!
//! Two incompatible shapes exist and exactly one is active per deployment,
//! selected by [`ItinerarySchema`]:
//!
//! - [`ItinerarySchema::V1`] produces a [`NarrativeItinerary`]: a prose
//!   paragraph with calendar events serialized into a JSON string.
//! - [`ItinerarySchema::V2`] produces a [`StructuredItinerary`]: an ordered
//!   list of [`ItineraryEvent`]s. This is the canonical shape.
//!
//! Callers holding a v1 result can move to typed events through
//! [`NarrativeItinerary::parsed_calendar_events`].

use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::SafetyAlert;

/// Which itinerary contract the deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItinerarySchema {
    /// Narrative paragraph plus serialized calendar events
    V1,
    /// Structured day/time/activity/description events
    #[default]
    V2,
}

impl FromStr for ItinerarySchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "narrative" => Ok(ItinerarySchema::V1),
            "v2" | "structured" => Ok(ItinerarySchema::V2),
            _ => Err(format!("Invalid itinerary schema: {s} (expected v1 or v2)")),
        }
    }
}

impl fmt::Display for ItinerarySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItinerarySchema::V1 => write!(f, "v1"),
            ItinerarySchema::V2 => write!(f, "v2"),
        }
    }
}

/// v1 itinerary: one narrative field and a JSON-in-a-string event list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NarrativeItinerary {
    /// A human-readable itinerary paragraph in the requested language.
    pub itinerary: String,
    /// A packing checklist, plain text, one item per line.
    pub packing_checklist: String,
    /// Calendar events as a JSON array of {title, start, end, notes}.
    pub calendar_events: String,
    /// One short travel safety note based on the weather alerts.
    pub safety_note: String,
}

/// Typed calendar entry decoded from a v1 `calendar_events` string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub notes: String,
}

impl NarrativeItinerary {
    /// Decodes the serialized calendar events.
    ///
    /// The backend is only asked to embed valid JSON, so this can fail even
    /// for a result that passed its contract.
    pub fn parsed_calendar_events(&self) -> serde_json::Result<Vec<CalendarEvent>> {
        let trimmed = self.calendar_events.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(trimmed)
    }
}

/// One scheduled activity in a v2 itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItineraryEvent {
    /// Day of the trip, starting at 1.
    pub day: u32,
    /// Free-text time range, e.g. "6:00 AM - 8:00 AM".
    pub time: String,
    /// Short name of the activity.
    pub activity: String,
    /// What to do and what to keep in mind.
    pub description: String,
}

/// v2 itinerary: ordered events plus checklist and safety note.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StructuredItinerary {
    /// Ordered list of scheduled events.
    pub events: Vec<ItineraryEvent>,
    /// A packing checklist, plain text, one item per line.
    pub packing_checklist: String,
    /// One short travel safety note based on the weather alerts.
    pub safety_note: String,
}

impl StructuredItinerary {
    /// Number of distinct days covered by the events.
    pub fn day_count(&self) -> usize {
        let mut days: Vec<u32> = self.events.iter().map(|e| e.day).collect();
        days.dedup();
        days.len()
    }

    /// Events scheduled on the given 1-based day.
    pub fn events_on(&self, day: u32) -> impl Iterator<Item = &ItineraryEvent> {
        self.events.iter().filter(move |e| e.day == day)
    }
}

/// Itinerary in whichever shape the deployment is configured for.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ItineraryResult {
    Narrative(NarrativeItinerary),
    Structured(StructuredItinerary),
}

impl ItineraryResult {
    pub fn schema(&self) -> ItinerarySchema {
        match self {
            ItineraryResult::Narrative(_) => ItinerarySchema::V1,
            ItineraryResult::Structured(_) => ItinerarySchema::V2,
        }
    }

    pub fn packing_checklist(&self) -> &str {
        match self {
            ItineraryResult::Narrative(i) => &i.packing_checklist,
            ItineraryResult::Structured(i) => &i.packing_checklist,
        }
    }

    pub fn safety_note(&self) -> &str {
        match self {
            ItineraryResult::Narrative(i) => &i.safety_note,
            ItineraryResult::Structured(i) => &i.safety_note,
        }
    }

    /// Checklist items with blank lines and list markers removed.
    pub fn checklist_items(&self) -> Vec<&str> {
        split_checklist(self.packing_checklist())
    }
}

/// Splits a newline-delimited checklist, dropping blank lines and any list
/// markers the backend added despite being asked not to.
pub fn split_checklist(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Safety alert and the itinerary generated with it in mind.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TripPlan {
    pub alert: SafetyAlert,
    pub itinerary: ItineraryResult,
}
