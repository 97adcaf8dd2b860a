//! MCP server implementation for Yatra
//!
//! Exposes the companion operations as MCP tools so AI assistants can plan
//! a Srisailam trip on a pilgrim's behalf.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use yatra_core::Companion;

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    DarshanQuery, McpResult, SafetyAlertRequest, TranslationRequest, TripRequest, VoiceQuery,
    WeatherLookup,
};

/// MCP server for Yatra
#[derive(Clone)]
pub struct YatraMcpServer {
    companion: Companion,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl YatraMcpServer {
    pub fn new(companion: Companion) -> Self {
        Self {
            companion,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.companion.clone())
    }

    #[tool(
        name = "plan_trip",
        description = "Plan a Srisailam trip. Fetches current safety alerts first, then generates an itinerary that accounts for them. Requires 'from' (starting city), 'arrive_datetime' (RFC 3339, e.g. 2024-05-01T21:30:00+05:30), 'group_size' (at least 1) and 'language' ('English' or 'Hindi'). Optional: 'hotel', and 'weather_alerts' to override the fetched alert summary. Returns the alert followed by the itinerary."
    )]
    async fn plan_trip(&self, params: Parameters<TripRequest>) -> McpResult {
        self.handlers().plan_trip(params).await
    }

    #[tool(
        name = "generate_itinerary",
        description = "Generate an itinerary only, without fetching safety alerts. Same parameters as plan_trip. Day-by-day events with times, a packing checklist and a safety note."
    )]
    async fn generate_itinerary(&self, params: Parameters<TripRequest>) -> McpResult {
        self.handlers().generate_itinerary(params).await
    }

    #[tool(
        name = "get_safety_alerts",
        description = "Weather-based safety alert for a location (usually 'Srisailam'): status (All Clear, Warning or Danger), a short summary, temperature, conditions, and whether the ghat road through the tiger reserve is likely open. Falls back to a cautious Warning when live data is unavailable."
    )]
    async fn get_safety_alerts(&self, params: Parameters<SafetyAlertRequest>) -> McpResult {
        self.handlers().get_safety_alerts(params).await
    }

    #[tool(
        name = "translate_phrase",
        description = "Translate a short English phrase into Telugu. Returns the Telugu script and an English-letter transliteration."
    )]
    async fn translate_phrase(&self, params: Parameters<TranslationRequest>) -> McpResult {
        self.handlers().translate_phrase(params).await
    }

    #[tool(
        name = "voice_query",
        description = "Answer a pilgrim's spoken question. Provide 'transcribedText' and 'language', optionally 'tripDetails' and 'currentAlerts'. Returns a short reply tagged info, action or clarify, with an optional follow-up question and Telugu phrase."
    )]
    async fn voice_query(&self, params: Parameters<VoiceQuery>) -> McpResult {
        self.handlers().voice_query(params).await
    }

    #[tool(
        name = "get_weather",
        description = "Current weather for a place name: conditions, temperature in Celsius, wind speed, humidity and rain in the last hour."
    )]
    async fn get_weather(&self, params: Parameters<WeatherLookup>) -> McpResult {
        self.handlers().get_weather(params).await
    }

    #[tool(
        name = "emergency_info",
        description = "Emergency phone numbers, hospitals near Srisailam, ghat road opening hours and health tips for the trip."
    )]
    async fn emergency_info(&self) -> McpResult {
        self.handlers().emergency_info()
    }

    #[tool(
        name = "darshan_faq",
        description = "Darshan FAQ: timings, dress code, ID proof, mobile phone policy and ticket types. Pass 'query' with an FAQ id or keyword to narrow the answer; omit it to list everything."
    )]
    async fn darshan_faq(&self, params: Parameters<DarshanQuery>) -> McpResult {
        self.handlers().darshan_faq(params)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for YatraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "yatra".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Yatra is a travel companion for pilgrims visiting the Srisailam temple in Andhra Pradesh.

## Workflow
1. Check `get_safety_alerts` before planning. The ghat road through the Nallamala forest closes at night and in severe weather.
2. Use `plan_trip` for a full plan, or `generate_itinerary` when alerts are already known.
3. Use `translate_phrase` and `voice_query` to help with Telugu on the ground.

## Reference
- `emergency_info` and `darshan_faq` work offline and never call the generation backend.
- Arrival times without an offset are read as IST (UTC+05:30)."#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context)
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context)
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: YatraMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Yatra MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
