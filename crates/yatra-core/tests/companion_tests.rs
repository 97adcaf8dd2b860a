mod common;

use std::sync::Arc;

use common::{alert_json, create_test_companion, three_day_itinerary, StubUpstream};
use serde_json::json;
use yatra_core::{
    generation::Turn, params::parse_arrival, ItineraryResult, ItinerarySchema, Language,
    SafetyAlert, SafetyAlertRequest, SafetyStatus, ScriptedGenerator, TranslationRequest,
    TripRequest, WeatherLookup, WeatherSnapshot, YatraError,
};

fn pune_trip() -> TripRequest {
    TripRequest {
        from: "Pune".to_string(),
        arrive_datetime: parse_arrival("2024-05-01T16:00:00Z").expect("valid arrival"),
        group_size: 2,
        hotel: None,
        language: Language::English,
        weather_alerts: None,
    }
}

#[tokio::test]
async fn test_pune_family_gets_three_day_itinerary() {
    let generator = Arc::new(ScriptedGenerator::new().then_output(three_day_itinerary()));
    let companion = create_test_companion(&generator, None, ItinerarySchema::V2);

    let result = companion
        .generate_itinerary(&pune_trip())
        .await
        .expect("Failed to generate itinerary");

    let ItineraryResult::Structured(itinerary) = result else {
        panic!("expected the structured shape");
    };
    assert_eq!(itinerary.day_count(), 3);
    assert_eq!(itinerary.events[0].day, 1);
    assert!(!itinerary.packing_checklist.is_empty());
    assert!(!itinerary.safety_note.is_empty());

    // 16:00 UTC is 21:30 IST
    let prompt = &generator.requests()[0].prompt;
    assert!(prompt.contains("arrives in the night (2024-05-01 21:30 IST)"));
    assert!(prompt.contains(r#""hotel": null"#));
}

#[tokio::test]
async fn test_weather_tool_runs_between_backend_calls() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_tool_call("call_1", "getWeather", json!({"location": "Srisailam"}))
            .then_output(alert_json("All Clear", true)),
    );
    let upstream = Arc::new(StubUpstream::srisailam().watching(generator.clone()));
    let companion = create_test_companion(&generator, Some(upstream.clone()), ItinerarySchema::V2);

    let alert = companion
        .safety_alerts(&SafetyAlertRequest::default())
        .await
        .expect("Failed to get alerts");
    assert_eq!(alert.status, SafetyStatus::AllClear);

    // exactly one backend call had been made when the lookup ran
    assert_eq!(*upstream.backend_requests_at_lookup.lock().unwrap(), vec![1]);
    assert_eq!(upstream.conditions_count(), 1);

    let requests = generator.requests();
    assert_eq!(requests.len(), 2);
    match &requests[1].transcript[..] {
        [Turn::ToolCall(call), Turn::ToolResult { call_id, content, .. }] => {
            assert_eq!(call.id, "call_1");
            assert_eq!(call_id, "call_1");
            assert_eq!(content["temperature"], 33.4);
            assert_eq!(content["rain_volume"], 0.0);
        }
        other => panic!("unexpected transcript: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_location_stops_before_conditions_call() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_tool_call("call_1", "getWeather", json!({"location": "Shangri-La"}))
            .then_output(alert_json("All Clear", true)),
    );
    let upstream = Arc::new(StubUpstream::nowhere());
    let companion = create_test_companion(&generator, Some(upstream.clone()), ItinerarySchema::V2);

    let err = companion
        .safety_alerts(&SafetyAlertRequest::new("Shangri-La"))
        .await
        .unwrap_err();
    assert!(matches!(err, YatraError::LocationNotFound { .. }));
    assert_eq!(upstream.geocode_count(), 1);
    assert_eq!(upstream.conditions_count(), 0);
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn test_danger_alert_never_reports_open_ghat() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_tool_call("call_1", "getWeather", json!({"location": "Srisailam"}))
            .then_output(alert_json("Danger", true)),
    );
    let companion = create_test_companion(
        &generator,
        Some(Arc::new(StubUpstream::srisailam())),
        ItinerarySchema::V2,
    );

    let alert = companion
        .safety_alerts(&SafetyAlertRequest::default())
        .await
        .expect("Failed to get alerts");
    assert_eq!(alert.status, SafetyStatus::Danger);
    assert!(!alert.is_ghat_open);
}

#[tokio::test]
async fn test_degraded_mode_uses_placeholder_weather() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_tool_call("call_1", "getWeather", json!({"location": "Srisailam"}))
            .then_output(alert_json("All Clear", true)),
    );
    let companion = create_test_companion(&generator, None, ItinerarySchema::V2);

    companion
        .safety_alerts(&SafetyAlertRequest::default())
        .await
        .expect("Failed to get alerts");

    let expected = serde_json::to_value(WeatherSnapshot::placeholder("Srisailam")).unwrap();
    match &generator.requests()[1].transcript[1] {
        Turn::ToolResult { content, .. } => assert_eq!(content, &expected),
        other => panic!("unexpected turn: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_flow_falls_back_to_conservative_alert() {
    let generator = Arc::new(ScriptedGenerator::new().then_error("connection reset"));
    let companion = create_test_companion(&generator, None, ItinerarySchema::V2);

    let alert = companion
        .safety_alerts_or_fallback(&SafetyAlertRequest::default())
        .await;
    assert_eq!(alert, SafetyAlert::unavailable());
}

#[tokio::test]
async fn test_identical_translations_are_not_merged() {
    let output = json!({
        "teluguText": "తాగునీరు ఎక్కడ?",
        "transliteration": "Taaguneeru ekkada?",
        "ttsLang": "te-IN"
    });
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_output(output.clone())
            .then_output(output),
    );
    let companion = create_test_companion(&generator, None, ItinerarySchema::V2);

    let request = TranslationRequest {
        phrase: "Where is drinking water?".to_string(),
    };
    let (first, second) = tokio::join!(
        companion.translate_phrase(&request),
        companion.translate_phrase(&request)
    );
    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(generator.requests().len(), 2);
}

#[tokio::test]
async fn test_weather_lookup_through_companion() {
    let generator = Arc::new(ScriptedGenerator::new());
    let upstream = Arc::new(StubUpstream::srisailam());
    let companion = create_test_companion(&generator, Some(upstream), ItinerarySchema::V2);

    let snapshot = companion
        .weather(&WeatherLookup {
            location: "Srisailam".to_string(),
        })
        .await
        .expect("Failed to look up weather");
    assert_eq!(snapshot.condition, "Clear");
    assert_eq!(snapshot.rain_volume, 0.0);
    assert!(generator.requests().is_empty());
}
