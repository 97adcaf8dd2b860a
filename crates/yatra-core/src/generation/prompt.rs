//! Instruction templates.
//!
//! Templates are handlebars with HTML escaping disabled. Input values are
//! inserted through the `json` helper so strings are quoted and `null`
//! stays `null`, which keeps the embedded input block valid JSON whatever the
//! caller typed.
//!
//! Length budgets in the templates are hints to the backend. Nothing checks
//! or truncates the output length.

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::{json, Value};

use crate::{
    error::Result,
    params::{SafetyAlertRequest, TranslationRequest, TripRequest, VoiceQuery},
};

pub const ITINERARY_V1: &str = "itinerary_v1";
pub const ITINERARY_V2: &str = "itinerary_v2";
pub const SAFETY_ALERTS: &str = "safety_alerts";
pub const TRANSLATE_PHRASE: &str = "translate_phrase";
pub const VOICE_QUERY: &str = "voice_query";

const TRIP_INPUT_BLOCK: &str = r#"Input JSON:
{
  "from": {{json from}},
  "arrive_datetime": {{json arrive_datetime}},
  "group_size": {{json group_size}},
  "hotel": {{json hotel}},
  "language": {{json language}},
  "weather_alerts": {{json weather_alerts}}
}"#;

const ITINERARY_V1_TEMPLATE: &str = r#"You are a friendly travel assistant. Create a concise 3-day itinerary for a family visiting Mallikarjuna (Srisailam).
{{> trip_input}}

The group arrives in the {{arrival_part_of_day}} ({{arrival_local}}). The first thing scheduled on day 1 must suit that time of day.

Return:
1) "itinerary": a human-readable itinerary paragraph written in {{language}}.
2) "packing_checklist": plain text, one item per line, no markdown and no bullet symbols.
3) "calendar_events": a JSON array serialized as a string, each element {"title": string, "start": ISO-8601, "end": ISO-8601, "notes": string}.
4) "safety_note": one short travel safety note in {{language}} based on weather_alerts.
Keep each section short and scannable. Maximum total tokens 600."#;

const ITINERARY_V2_TEMPLATE: &str = r#"You are a friendly travel assistant. Create a concise 3-day itinerary for a family visiting Mallikarjuna (Srisailam).
{{> trip_input}}

The group arrives in the {{arrival_part_of_day}} ({{arrival_local}}). The first event on day 1 must suit that time of day.

Return:
1) "events": an ordered list of objects with exactly the fields "day", "time", "activity", "description".
   - "day" is an integer starting at 1.
   - "time" is a free-text range such as "6:00 AM - 8:00 AM".
   - "activity" and "description" are written in {{language}}.
2) "packing_checklist": plain text, one item per line, no markdown and no bullet symbols, written in {{language}}.
3) "safety_note": one short travel safety note in {{language}} based on weather_alerts.
Keep each section short and scannable. Maximum total tokens 600."#;

const SAFETY_ALERTS_TEMPLATE: &str = r#"You are a travel safety assistant for a pilgrimage to Srisailam. Your primary role is to provide clear and concise safety alerts based on weather data.

Location: {{location}}

1. Use the getWeather tool to get the current weather conditions for the location.
2. Analyze the weather data (temperature, conditions, wind speed, rain volume).
3. Determine a safety status:
   * "All Clear": Good weather, no significant risks.
   * "Warning": Moderate issues like heavy rain or strong winds. Advise caution.
   * "Danger": Severe conditions like storms or very heavy rain. Advise against travel on ghat roads.
4. Write a brief, one-sentence summary of the situation.
5. Based on the weather, determine if the ghat road is likely open. It must be closed for "Danger" status.
6. Output the current temperature in Celsius.

Provide a response in the required JSON format."#;

const TRANSLATE_PHRASE_TEMPLATE: &str = r#"Translate the short phrase {{json phrase}} into polite, short Telugu suitable for showing to a shopkeeper or guard. Keep it under 10 words.
Provide the transliteration in Latin letters and a recommended speech-synthesis language tag.
Return JSON: { "teluguText": "...", "transliteration": "...", "ttsLang": "te-IN" }"#;

const VOICE_QUERY_TEMPLATE: &str = r#"You are an assistant for pilgrims travelling to Srisailam. Answer in {{language}}.
User question: {{json transcribedText}}
Trip details: {{json tripDetails}}
Current alerts: {{json currentAlerts}}

1) If the question asks for something to be done (e.g. "Find nearest hotels from Pune"), set "type" to "action" and respond with a short plan of action. No booking or hotel search service is connected, so do not invent results.
2) If it is an information question (e.g. "What to wear for sparsha darshan?"), set "type" to "info" and answer from the temple's published darshan guidelines.
3) If you are uncertain, set "type" to "clarify" and put a single clarifying question in "followup".
If a short Telugu phrase would help the user (for example to show a shopkeeper), fill "teluguPhrase" with "teluguText", "transliteration" and "ttsLang" ("te-IN"); otherwise set it to null.
Return: { "type": "action" | "info" | "clarify", "responseText": "...", "followup": null, "teluguPhrase": null }"#;

handlebars_helper!(json_literal: |v: Json| v.to_string());

/// Input types that can fill an instruction template.
pub trait PromptInput {
    /// Values the template refers to.
    fn prompt_data(&self) -> Result<Value>;
}

impl PromptInput for TripRequest {
    fn prompt_data(&self) -> Result<Value> {
        Ok(json!({
            "from": self.from,
            "arrive_datetime": self.arrive_datetime.to_string(),
            "arrival_local": self.arrival_local()?,
            "arrival_part_of_day": self.arrival_part_of_day()?.to_string(),
            "group_size": self.group_size,
            "hotel": self.hotel,
            "language": self.language.as_str(),
            "weather_alerts": self.weather_alerts,
        }))
    }
}

impl PromptInput for SafetyAlertRequest {
    fn prompt_data(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PromptInput for TranslationRequest {
    fn prompt_data(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PromptInput for VoiceQuery {
    fn prompt_data(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Registry of every instruction template.
pub struct PromptLibrary {
    registry: Handlebars<'static>,
}

impl PromptLibrary {
    /// Registers all templates.
    ///
    /// # Errors
    ///
    /// Returns `YatraError::Template` if a template fails to compile.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.set_strict_mode(true);
        registry.register_helper("json", Box::new(json_literal));

        registry.register_partial("trip_input", TRIP_INPUT_BLOCK)?;
        registry.register_template_string(ITINERARY_V1, ITINERARY_V1_TEMPLATE)?;
        registry.register_template_string(ITINERARY_V2, ITINERARY_V2_TEMPLATE)?;
        registry.register_template_string(SAFETY_ALERTS, SAFETY_ALERTS_TEMPLATE)?;
        registry.register_template_string(TRANSLATE_PHRASE, TRANSLATE_PHRASE_TEMPLATE)?;
        registry.register_template_string(VOICE_QUERY, VOICE_QUERY_TEMPLATE)?;

        Ok(Self { registry })
    }

    /// Render a named template for the given input.
    pub fn render<I: PromptInput + ?Sized>(&self, name: &str, input: &I) -> Result<String> {
        let data = input.prompt_data()?;
        Ok(self.registry.render(name, &data)?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}
