//! Schema contracts for generation operations.
//!
//! Each operation has exactly one contract: a unit type implementing
//! [`Contract`] that ties together
//!
//! - the Rust input type and how to read it from raw JSON ([`Contract::read_input`]),
//! - the Rust output type, whose JSON schema is generated with `schemars` and
//!   sent to the backend as the required response format,
//! - the semantic checks a parsed output must pass ([`Contract::check_output`]).
//!
//! The Rust types are the compile-time artifact, the reader and checks are the
//! runtime validator. Keeping both in one impl keeps them in step.
//!
//! ```text
//! raw JSON ──parse_input──▶ C::Input ──(prompt, backend)──▶ raw JSON ──parse_output──▶ C::Output
//!                │                                                         │
//!                └── Validation { field }                    SchemaMismatch ┘
//! ```

use std::{fmt, str::FromStr};

use log::warn;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Result, YatraError},
    generation::prompt::{self, PromptInput},
    models::{
        NarrativeItinerary, SafetyAlert, StructuredItinerary, TranslationResult, VoiceReply,
    },
    params::{
        parse_arrival, SafetyAlertRequest, TranslationRequest, TripRequest, VoiceQuery,
    },
};

/// Semantic constraints beyond what the type system enforces.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Declared input/output shape of one generation operation.
pub trait Contract {
    /// Operation name as used by [`crate::Companion::generate`] and in errors.
    const OPERATION: &'static str;
    /// Name of the instruction template in [`crate::generation::PromptLibrary`].
    const TEMPLATE: &'static str;

    type Input: Serialize + Validate + PromptInput + Send + Sync;
    type Output: DeserializeOwned + Serialize + JsonSchema + Send;

    /// Reads the input from a raw JSON object, naming any offending field.
    fn read_input(fields: &FieldReader<'_>) -> Result<Self::Input>;

    /// Checks (and where the rules allow, normalizes) a parsed output.
    fn check_output(_output: &mut Self::Output) -> Result<()> {
        Ok(())
    }
}

/// Parses and validates a raw input object against contract `C`.
///
/// # Errors
///
/// Returns `YatraError::Validation` naming the first offending field.
pub fn parse_input<C: Contract>(raw: &Value) -> Result<C::Input> {
    let fields = FieldReader::new(raw)?;
    let input = C::read_input(&fields)?;
    input.validate()?;
    Ok(input)
}

/// Accepts a backend response only if it fits contract `C`.
///
/// # Errors
///
/// Returns `YatraError::SchemaMismatch` if the value cannot be deserialized
/// into `C::Output` or fails its semantic checks. No partial value is ever
/// returned.
pub fn parse_output<C: Contract>(raw: Value) -> Result<C::Output> {
    let mut output: C::Output = serde_json::from_value(raw)
        .map_err(|e| YatraError::schema_mismatch(C::OPERATION).with_reason(e.to_string()))?;
    C::check_output(&mut output)?;
    Ok(output)
}

/// JSON schema of the output of contract `C`, sent to the backend.
///
/// # Errors
///
/// Returns `YatraError::Serialization` if the schema cannot be converted to
/// JSON.
pub fn output_schema<C: Contract>() -> Result<Value> {
    let schema = schemars::schema_for!(C::Output);
    Ok(serde_json::to_value(&schema)?)
}

/// Field-by-field reader over a raw JSON object.
pub struct FieldReader<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// Wraps a raw value, which must be a JSON object.
    pub fn new(raw: &'a Value) -> Result<Self> {
        raw.as_object().map(|map| Self { map }).ok_or_else(|| {
            YatraError::validation("input").with_reason("expected a JSON object")
        })
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub fn required_str(&self, field: &str) -> Result<String> {
        match self.present(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) => {
                Err(YatraError::validation(field).with_reason("must not be empty"))
            }
            Some(other) => Err(type_error(field, "a string", other)),
            None => Err(YatraError::validation(field).with_reason("is required")),
        }
    }

    /// Nullable string: absent and `null` both read as `None`.
    pub fn optional_str(&self, field: &str) -> Result<Option<String>> {
        match self.present(field) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(type_error(field, "a string or null", other)),
            None => Ok(None),
        }
    }

    pub fn required_positive_int(&self, field: &str) -> Result<u32> {
        let value = self
            .present(field)
            .ok_or_else(|| YatraError::validation(field).with_reason("is required"))?;
        let n = value
            .as_u64()
            .ok_or_else(|| type_error(field, "a positive integer", value))?;
        if n == 0 {
            return Err(YatraError::validation(field).with_reason("must be at least 1"));
        }
        u32::try_from(n).map_err(|_| YatraError::validation(field).with_reason("is too large"))
    }

    /// Closed enum read through its `FromStr` implementation.
    pub fn required_enum<T>(&self, field: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.required_str(field)?;
        raw.parse::<T>()
            .map_err(|e| YatraError::validation(field).with_reason(e.to_string()))
    }
}

fn type_error(field: &str, expected: &str, got: &Value) -> YatraError {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    YatraError::validation(field).with_reason(format!("expected {expected}, got {kind}"))
}

fn require_text(operation: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(YatraError::schema_mismatch(operation).with_reason(format!("'{field}' is empty")))
    } else {
        Ok(())
    }
}

fn read_trip(fields: &FieldReader<'_>) -> Result<TripRequest> {
    let arrive_raw = fields.required_str("arrive_datetime")?;
    Ok(TripRequest {
        from: fields.required_str("from")?,
        arrive_datetime: parse_arrival(&arrive_raw)?,
        group_size: fields.required_positive_int("group_size")?,
        hotel: fields.optional_str("hotel")?,
        language: fields.required_enum("language")?,
        weather_alerts: fields.optional_str("weather_alerts")?,
    })
}

/// v1 itinerary: narrative text with serialized calendar events.
pub struct NarrativeItineraryContract;

impl Contract for NarrativeItineraryContract {
    const OPERATION: &'static str = "itinerary";
    const TEMPLATE: &'static str = prompt::ITINERARY_V1;
    type Input = TripRequest;
    type Output = NarrativeItinerary;

    fn read_input(fields: &FieldReader<'_>) -> Result<TripRequest> {
        read_trip(fields)
    }

    fn check_output(output: &mut NarrativeItinerary) -> Result<()> {
        require_text(Self::OPERATION, "itinerary", &output.itinerary)?;
        require_text(Self::OPERATION, "packing_checklist", &output.packing_checklist)?;
        require_text(Self::OPERATION, "safety_note", &output.safety_note)?;
        output.parsed_calendar_events().map_err(|e| {
            YatraError::schema_mismatch(Self::OPERATION)
                .with_reason(format!("'calendar_events' is not a JSON array of events: {e}"))
        })?;
        Ok(())
    }
}

/// v2 itinerary: ordered day/time/activity/description events.
pub struct StructuredItineraryContract;

impl Contract for StructuredItineraryContract {
    const OPERATION: &'static str = "itinerary";
    const TEMPLATE: &'static str = prompt::ITINERARY_V2;
    type Input = TripRequest;
    type Output = StructuredItinerary;

    fn read_input(fields: &FieldReader<'_>) -> Result<TripRequest> {
        read_trip(fields)
    }

    fn check_output(output: &mut StructuredItinerary) -> Result<()> {
        if output.events.is_empty() {
            return Err(
                YatraError::schema_mismatch(Self::OPERATION).with_reason("'events' is empty")
            );
        }
        let mut previous_day = 1;
        for (i, event) in output.events.iter().enumerate() {
            if event.day == 0 {
                return Err(YatraError::schema_mismatch(Self::OPERATION)
                    .with_reason(format!("events[{i}].day must be 1 or greater")));
            }
            if event.day < previous_day {
                return Err(YatraError::schema_mismatch(Self::OPERATION).with_reason(format!(
                    "events[{i}] is on day {} after day {previous_day}",
                    event.day
                )));
            }
            previous_day = event.day;
            require_text(Self::OPERATION, &format!("events[{i}].activity"), &event.activity)?;
        }
        require_text(Self::OPERATION, "packing_checklist", &output.packing_checklist)?;
        require_text(Self::OPERATION, "safety_note", &output.safety_note)
    }
}

/// Safety alert produced by the tool-augmented flow.
pub struct SafetyAlertContract;

impl Contract for SafetyAlertContract {
    const OPERATION: &'static str = "safety_alerts";
    const TEMPLATE: &'static str = prompt::SAFETY_ALERTS;
    type Input = SafetyAlertRequest;
    type Output = SafetyAlert;

    fn read_input(fields: &FieldReader<'_>) -> Result<SafetyAlertRequest> {
        Ok(SafetyAlertRequest {
            location: fields.required_str("location")?,
        })
    }

    fn check_output(output: &mut SafetyAlert) -> Result<()> {
        require_text(Self::OPERATION, "summary", &output.summary)?;
        if output.contradicts_ghat_rule() {
            warn!("Backend reported Danger with the ghat road open; marking it closed");
            output.is_ghat_open = false;
        }
        Ok(())
    }
}

/// Telugu phrase translation.
pub struct TranslationContract;

impl Contract for TranslationContract {
    const OPERATION: &'static str = "translate_phrase";
    const TEMPLATE: &'static str = prompt::TRANSLATE_PHRASE;
    type Input = TranslationRequest;
    type Output = TranslationResult;

    fn read_input(fields: &FieldReader<'_>) -> Result<TranslationRequest> {
        Ok(TranslationRequest {
            phrase: fields.required_str("phrase")?,
        })
    }

    fn check_output(output: &mut TranslationResult) -> Result<()> {
        require_text(Self::OPERATION, "teluguText", &output.telugu_text)?;
        require_text(Self::OPERATION, "transliteration", &output.transliteration)
    }
}

/// Voice assistant query.
pub struct VoiceQueryContract;

impl Contract for VoiceQueryContract {
    const OPERATION: &'static str = "voice_query";
    const TEMPLATE: &'static str = prompt::VOICE_QUERY;
    type Input = VoiceQuery;
    type Output = VoiceReply;

    fn read_input(fields: &FieldReader<'_>) -> Result<VoiceQuery> {
        Ok(VoiceQuery {
            transcribed_text: fields.required_str("transcribedText")?,
            language: fields.required_enum("language")?,
            trip_details: fields.optional_str("tripDetails")?,
            current_alerts: fields.optional_str("currentAlerts")?,
        })
    }

    fn check_output(output: &mut VoiceReply) -> Result<()> {
        require_text(Self::OPERATION, "responseText", &output.response_text)
    }
}

/// Operation names accepted by the dynamic entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Itinerary,
    SafetyAlerts,
    TranslatePhrase,
    VoiceQuery,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Itinerary,
        Operation::SafetyAlerts,
        Operation::TranslatePhrase,
        Operation::VoiceQuery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Itinerary => NarrativeItineraryContract::OPERATION,
            Operation::SafetyAlerts => SafetyAlertContract::OPERATION,
            Operation::TranslatePhrase => TranslationContract::OPERATION,
            Operation::VoiceQuery => VoiceQueryContract::OPERATION,
        }
    }
}

impl FromStr for Operation {
    type Err = YatraError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                YatraError::validation("operation").with_reason(format!(
                    "unknown operation '{s}' (expected one of: {})",
                    Operation::ALL.map(|op| op.as_str()).join(", ")
                ))
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{Language, SafetyStatus};

    fn trip_json() -> Value {
        json!({
            "from": "Pune",
            "arrive_datetime": "2024-05-01T16:00:00Z",
            "group_size": 2,
            "hotel": null,
            "language": "English"
        })
    }

    fn field_of(result: Result<TripRequest>) -> String {
        result
            .unwrap_err()
            .field()
            .expect("validation error")
            .to_string()
    }

    #[test]
    fn test_parse_trip_request() {
        let trip = parse_input::<StructuredItineraryContract>(&trip_json()).expect("valid trip");
        assert_eq!(trip.from, "Pune");
        assert_eq!(trip.group_size, 2);
        assert_eq!(trip.hotel, None);
        assert_eq!(trip.language, Language::English);
        assert_eq!(trip.weather_alerts, None);
        assert_eq!(trip.arrive_datetime.to_string(), "2024-05-01T16:00:00Z");
    }

    #[test]
    fn test_trip_validation_names_field() {
        let mut raw = trip_json();
        raw["group_size"] = json!(0);
        assert_eq!(field_of(parse_input::<StructuredItineraryContract>(&raw)), "group_size");

        let mut raw = trip_json();
        raw["group_size"] = json!("two");
        assert_eq!(field_of(parse_input::<StructuredItineraryContract>(&raw)), "group_size");

        let mut raw = trip_json();
        raw["language"] = json!("Telugu");
        assert_eq!(field_of(parse_input::<StructuredItineraryContract>(&raw)), "language");

        let mut raw = trip_json();
        raw["arrive_datetime"] = json!("next tuesday");
        assert_eq!(
            field_of(parse_input::<StructuredItineraryContract>(&raw)),
            "arrive_datetime"
        );

        let mut raw = trip_json();
        raw.as_object_mut().unwrap().remove("from");
        assert_eq!(field_of(parse_input::<StructuredItineraryContract>(&raw)), "from");

        let mut raw = trip_json();
        raw["hotel"] = json!(42);
        assert_eq!(field_of(parse_input::<StructuredItineraryContract>(&raw)), "hotel");
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        let err = parse_input::<TranslationContract>(&json!(["phrase"])).unwrap_err();
        assert_eq!(err.field(), Some("input"));
    }

    #[test]
    fn test_structured_output_rejects_day_zero() {
        let raw = json!({
            "events": [{"day": 0, "time": "6 AM", "activity": "Darshan", "description": "x"}],
            "packing_checklist": "Water",
            "safety_note": "Drive slowly"
        });
        let err = parse_output::<StructuredItineraryContract>(raw).unwrap_err();
        assert!(matches!(err, YatraError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_structured_output_rejects_out_of_order_days() {
        let raw = json!({
            "events": [
                {"day": 2, "time": "6 AM", "activity": "Darshan", "description": ""},
                {"day": 1, "time": "9 AM", "activity": "Ropeway", "description": ""}
            ],
            "packing_checklist": "Water",
            "safety_note": "Drive slowly"
        });
        assert!(parse_output::<StructuredItineraryContract>(raw).is_err());
    }

    #[test]
    fn test_output_with_missing_field_is_mismatch() {
        let raw = json!({"itinerary": "Day 1...", "packing_checklist": "Water"});
        let err = parse_output::<NarrativeItineraryContract>(raw).unwrap_err();
        match err {
            YatraError::SchemaMismatch { operation, reason } => {
                assert_eq!(operation, "itinerary");
                assert!(reason.contains("calendar_events") || reason.contains("safety_note"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn narrative_json(calendar_events: &str) -> Value {
        json!({
            "itinerary": "Day 1: arrive and rest. Day 2: darshan.",
            "packing_checklist": "Shawl\nTorch",
            "calendar_events": calendar_events,
            "safety_note": "Drive slowly on the ghat road."
        })
    }

    #[test]
    fn test_narrative_output_rejects_prose_calendar() {
        let err = parse_output::<NarrativeItineraryContract>(narrative_json(
            "Day 1: arrive, Day 2: darshan",
        ))
        .unwrap_err();
        match err {
            YatraError::SchemaMismatch { operation, reason } => {
                assert_eq!(operation, "itinerary");
                assert!(reason.contains("calendar_events"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_narrative_output_accepts_empty_or_valid_calendar() {
        let empty = parse_output::<NarrativeItineraryContract>(narrative_json(""))
            .expect("empty calendar is zero events");
        assert!(empty.parsed_calendar_events().unwrap().is_empty());

        let events = r#"[{"title":"Darshan","start":"2024-05-02T06:00:00+05:30","end":"2024-05-02T08:00:00+05:30","notes":"Carry ID"}]"#;
        let itinerary = parse_output::<NarrativeItineraryContract>(narrative_json(events))
            .expect("valid calendar");
        assert_eq!(itinerary.parsed_calendar_events().unwrap().len(), 1);
    }

    #[test]
    fn test_danger_forces_ghat_closed() {
        let raw = json!({
            "status": "Danger",
            "summary": "Cyclone warning",
            "temperature": 22.5,
            "weatherCondition": "Thunderstorm",
            "isGhatOpen": true
        });
        let alert = parse_output::<SafetyAlertContract>(raw).expect("valid alert");
        assert_eq!(alert.status, SafetyStatus::Danger);
        assert!(!alert.is_ghat_open);
    }

    #[test]
    fn test_unknown_status_is_mismatch() {
        let raw = json!({
            "status": "Caution",
            "summary": "Some rain",
            "temperature": 22.5,
            "weatherCondition": "Rain",
            "isGhatOpen": true
        });
        assert!(matches!(
            parse_output::<SafetyAlertContract>(raw),
            Err(YatraError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_output_schema_lists_required_fields() {
        let schema = output_schema::<StructuredItineraryContract>().expect("schema");
        let required = schema["required"].as_array().expect("required list");
        let names: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert!(names.contains(&"events"));
        assert!(names.contains(&"packing_checklist"));
        assert!(names.contains(&"safety_note"));
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        let err = "weather_report".parse::<Operation>().unwrap_err();
        assert_eq!(err.field(), Some("operation"));
    }
}
