#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use yatra_core::{
    models::Coordinates,
    weather::RawConditions,
    Companion, CompanionBuilder, Config, ItinerarySchema, Result, ScriptedGenerator,
    WeatherPolicy, WeatherUpstream, YatraError,
};

/// Weather upstream stub that counts calls and records how many backend
/// requests had been made when the lookup ran.
pub struct StubUpstream {
    pub matches: Vec<Coordinates>,
    pub conditions: Value,
    pub geocode_calls: AtomicUsize,
    pub conditions_calls: AtomicUsize,
    pub backend_requests_at_lookup: Mutex<Vec<usize>>,
    generator: Option<Arc<ScriptedGenerator>>,
}

impl StubUpstream {
    pub fn srisailam() -> Self {
        Self {
            matches: vec![Coordinates {
                lat: 16.0733,
                lon: 78.8686,
            }],
            conditions: json!({
                "name": "Srisailam",
                "main": {"temp": 33.4, "humidity": 41},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 4.2}
            }),
            geocode_calls: AtomicUsize::new(0),
            conditions_calls: AtomicUsize::new(0),
            backend_requests_at_lookup: Mutex::new(Vec::new()),
            generator: None,
        }
    }

    pub fn nowhere() -> Self {
        Self {
            matches: Vec::new(),
            ..Self::srisailam()
        }
    }

    pub fn watching(mut self, generator: Arc<ScriptedGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn geocode_count(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn conditions_count(&self) -> usize {
        self.conditions_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherUpstream for StubUpstream {
    async fn geocode(&self, _location: &str) -> Result<Vec<Coordinates>> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(generator) = &self.generator {
            self.backend_requests_at_lookup
                .lock()
                .expect("lock")
                .push(generator.requests().len());
        }
        Ok(self.matches.clone())
    }

    async fn current_conditions(&self, _coordinates: Coordinates) -> Result<RawConditions> {
        self.conditions_calls.fetch_add(1, Ordering::SeqCst);
        serde_json::from_value(self.conditions.clone()).map_err(YatraError::from)
    }
}

/// Helper function to create a companion over a scripted backend and an
/// optional stub weather upstream
pub fn create_test_companion(
    generator: &Arc<ScriptedGenerator>,
    upstream: Option<Arc<StubUpstream>>,
    schema: ItinerarySchema,
) -> Companion {
    let config = Config::builder()
        .with_weather_policy(WeatherPolicy::Placeholder)
        .with_itinerary_schema(schema)
        .build();
    let mut builder = CompanionBuilder::new(config).with_generator(generator.clone());
    if let Some(upstream) = upstream {
        builder = builder.with_weather_upstream(upstream);
    }
    builder.build().expect("Failed to create companion")
}

pub fn alert_json(status: &str, is_ghat_open: bool) -> Value {
    json!({
        "status": status,
        "summary": "Clear skies over the Nallamala hills.",
        "temperature": 33.4,
        "weatherCondition": "Clear",
        "isGhatOpen": is_ghat_open
    })
}

pub fn three_day_itinerary() -> Value {
    json!({
        "events": [
            {"day": 1, "time": "4:00 PM - 6:00 PM", "activity": "Check in and rest", "description": "Settle in after the drive from Pune."},
            {"day": 1, "time": "7:00 PM - 8:30 PM", "activity": "Evening aarti", "description": "Attend the evening aarti at the main temple."},
            {"day": 2, "time": "5:00 AM - 9:00 AM", "activity": "Sarva darshan", "description": "Queue early with ID proof."},
            {"day": 2, "time": "11:00 AM - 2:00 PM", "activity": "Pathala Ganga", "description": "Take the ropeway down to the Krishna river."},
            {"day": 3, "time": "6:00 AM - 8:00 AM", "activity": "Sakshi Ganapati", "description": "Short visit before departure."},
            {"day": 3, "time": "9:00 AM", "activity": "Depart", "description": "Leave before the afternoon heat."}
        ],
        "packing_checklist": "Traditional clothes\nAadhaar card\nWater bottle\nSunscreen",
        "safety_note": "Cross the ghat road before the gates close at 9 PM."
    })
}
