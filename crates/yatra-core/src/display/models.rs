//! Display implementations for result models.
//!
//! Markdown, one top-level heading per result, kept separate from the model
//! definitions so the models stay plain data.

use std::fmt;

use crate::models::{
    itinerary::split_checklist, reference::GHAT_ROAD_HOURS, ItineraryResult, NarrativeItinerary,
    SafetyAlert, StructuredItinerary, TranslationResult, TripPlan, VoiceReply, WeatherSnapshot,
};

fn fmt_checklist(f: &mut fmt::Formatter<'_>, checklist: &str) -> fmt::Result {
    writeln!(f, "## Packing checklist")?;
    writeln!(f)?;
    for item in split_checklist(checklist) {
        writeln!(f, "- [ ] {item}")?;
    }
    writeln!(f)
}

fn fmt_safety_note(f: &mut fmt::Formatter<'_>, note: &str) -> fmt::Result {
    writeln!(f, "## Safety note")?;
    writeln!(f)?;
    writeln!(f, "> {}", note.trim())
}

impl fmt::Display for StructuredItinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Itinerary")?;

        let mut current_day = 0;
        for event in &self.events {
            if event.day != current_day {
                current_day = event.day;
                writeln!(f)?;
                writeln!(f, "## Day {current_day}")?;
                writeln!(f)?;
            }
            write!(f, "- **{}** {}", event.time, event.activity)?;
            if event.description.trim().is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, ": {}", event.description.trim())?;
            }
        }
        writeln!(f)?;

        fmt_checklist(f, &self.packing_checklist)?;
        fmt_safety_note(f, &self.safety_note)
    }
}

impl fmt::Display for NarrativeItinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Itinerary")?;
        writeln!(f)?;
        writeln!(f, "{}", self.itinerary.trim())?;
        writeln!(f)?;

        // Unparseable events are left out rather than failing the whole view
        if let Ok(events) = self.parsed_calendar_events() {
            if !events.is_empty() {
                writeln!(f, "## Calendar")?;
                writeln!(f)?;
                for event in events {
                    write!(f, "- {} ({} to {})", event.title, event.start, event.end)?;
                    if event.notes.is_empty() {
                        writeln!(f)?;
                    } else {
                        writeln!(f, ": {}", event.notes)?;
                    }
                }
                writeln!(f)?;
            }
        }

        fmt_checklist(f, &self.packing_checklist)?;
        fmt_safety_note(f, &self.safety_note)
    }
}

impl fmt::Display for ItineraryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItineraryResult::Narrative(itinerary) => write!(f, "{itinerary}"),
            ItineraryResult::Structured(itinerary) => write!(f, "{itinerary}"),
        }
    }
}

impl fmt::Display for SafetyAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Safety alert: {}", self.status.with_icon())?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "- Temperature: {:.1} °C", self.temperature)?;
        writeln!(f, "- Conditions: {}", self.weather_condition)?;
        if self.is_ghat_open {
            writeln!(f, "- Ghat road: likely open ({GHAT_ROAD_HOURS})")
        } else {
            writeln!(f, "- Ghat road: likely closed")
        }
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Weather in {}", self.location)?;
        writeln!(f)?;
        writeln!(f, "- Conditions: {}", self.condition)?;
        writeln!(f, "- Temperature: {:.1} °C", self.temperature)?;
        writeln!(f, "- Wind: {:.1} m/s", self.wind_speed)?;
        writeln!(f, "- Humidity: {:.0}%", self.humidity)?;
        writeln!(f, "- Rain (last hour): {:.1} mm", self.rain_volume)
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.telugu_text)?;
        writeln!(f)?;
        writeln!(f, "*{}*", self.transliteration)?;
        if let Some(lang) = &self.tts_lang {
            writeln!(f)?;
            writeln!(f, "Speech language: `{lang}`")?;
        }
        Ok(())
    }
}

impl fmt::Display for VoiceReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**[{}]** {}", self.kind, self.response_text)?;
        if let Some(followup) = &self.followup {
            writeln!(f)?;
            writeln!(f, "_{followup}_")?;
        }
        if let Some(phrase) = &self.telugu_phrase {
            writeln!(f)?;
            write!(f, "{phrase}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TripPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.alert)?;
        write!(f, "{}", self.itinerary)
    }
}
