//! Command handlers for the terminal interface.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! companion and renders the result through its `Display` implementation, the
//! same text the MCP server returns.

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use yatra_core::{
    Companion, DarshanGuide, DarshanQuery, EmergencySheet, SafetyAlertRequest, TripRequest,
};

use crate::{
    args::{
        AlertsArgs, AskArgs, DarshanArgs, GenerateArgs, ItineraryArgs, SchemaArgs, TranslateArgs,
        WeatherArgs,
    },
    renderer::TerminalRenderer,
};

/// Runs one command against a companion
pub struct Cli {
    companion: Companion,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(companion: Companion, renderer: TerminalRenderer) -> Self {
        Self {
            companion,
            renderer,
        }
    }

    /// Plans a trip. Safety alerts are fetched first unless skipped; a
    /// failed alert lookup falls back to the conservative alert.
    pub async fn itinerary(&self, args: ItineraryArgs) -> Result<()> {
        let skip_alerts = args.skip_alerts;
        let request = TripRequest::from(args);
        debug!("itinerary: {request:?}");

        if skip_alerts {
            let itinerary = self
                .companion
                .generate_itinerary(&request)
                .await
                .context("Failed to generate itinerary")?;
            self.renderer.render(&itinerary.to_string());
        } else {
            let plan = self
                .companion
                .plan_trip(&request)
                .await
                .context("Failed to plan trip")?;
            self.renderer.render(&plan.to_string());
        }
        Ok(())
    }

    /// Shows safety alerts, degrading to the conservative alert on failure
    pub async fn alerts(&self, args: AlertsArgs) -> Result<()> {
        let request = SafetyAlertRequest::from(args);
        let alert = self.companion.safety_alerts_or_fallback(&request).await;
        self.renderer.render(&alert.to_string());
        Ok(())
    }

    pub async fn translate(&self, args: TranslateArgs) -> Result<()> {
        let translation = self
            .companion
            .translate_phrase(&args.into())
            .await
            .context("Failed to translate phrase")?;
        self.renderer.render(&translation.to_string());
        Ok(())
    }

    pub async fn ask(&self, args: AskArgs) -> Result<()> {
        let reply = self
            .companion
            .voice_query(&args.into())
            .await
            .context("Failed to answer question")?;
        self.renderer.render(&reply.to_string());
        Ok(())
    }

    pub async fn weather(&self, args: WeatherArgs) -> Result<()> {
        let snapshot = self
            .companion
            .weather(&args.into())
            .await
            .context("Failed to fetch weather")?;
        self.renderer.render(&snapshot.to_string());
        Ok(())
    }

    pub fn emergency(&self) {
        self.renderer.render(&EmergencySheet.to_string());
    }

    pub fn darshan(&self, args: DarshanArgs) {
        let query = DarshanQuery::from(args);
        let guide = DarshanGuide::lookup(query.query.as_deref());
        self.renderer.render(&guide.to_string());
    }

    /// Runs an operation by name on raw JSON input
    pub async fn generate(&self, args: GenerateArgs) -> Result<()> {
        let input: Value =
            serde_json::from_str(&args.input).context("Operation input is not valid JSON")?;
        let output = self
            .companion
            .generate(&args.operation, &input)
            .await
            .with_context(|| format!("Operation '{}' failed", args.operation))?;
        self.renderer.render_json(&output)?;
        Ok(())
    }

    pub fn schema(&self, args: SchemaArgs) -> Result<()> {
        let schema = self
            .companion
            .output_schema(args.operation)
            .context("Failed to build output schema")?;
        self.renderer.render_json(&schema)?;
        Ok(())
    }
}
