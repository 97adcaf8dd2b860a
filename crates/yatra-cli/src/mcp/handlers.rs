//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use yatra_core::{params as core, Companion, DarshanGuide, EmergencySheet};

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

// The core parameter types stay free of MCP concerns. This transparent
// wrapper forwards deserialization and schema generation to the wrapped type
// so tool calls deserialize straight into core params.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type TripRequest = McpParams<core::TripRequest>;
pub type SafetyAlertRequest = McpParams<core::SafetyAlertRequest>;
pub type TranslationRequest = McpParams<core::TranslationRequest>;
pub type VoiceQuery = McpParams<core::VoiceQuery>;
pub type WeatherLookup = McpParams<core::WeatherLookup>;
pub type DarshanQuery = McpParams<core::DarshanQuery>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    companion: Companion,
}

impl McpHandlers {
    pub fn new(companion: Companion) -> Self {
        Self { companion }
    }

    pub async fn plan_trip(&self, Parameters(params): Parameters<TripRequest>) -> McpResult {
        debug!("plan_trip: {params:?}");

        let plan = self
            .companion
            .plan_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to plan trip", &e))?;
        text_result(plan.to_string())
    }

    pub async fn generate_itinerary(
        &self,
        Parameters(params): Parameters<TripRequest>,
    ) -> McpResult {
        debug!("generate_itinerary: {params:?}");

        let itinerary = self
            .companion
            .generate_itinerary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate itinerary", &e))?;
        text_result(itinerary.to_string())
    }

    pub async fn get_safety_alerts(
        &self,
        Parameters(params): Parameters<SafetyAlertRequest>,
    ) -> McpResult {
        debug!("get_safety_alerts: {params:?}");

        let alert = self
            .companion
            .safety_alerts_or_fallback(params.as_ref())
            .await;
        text_result(alert.to_string())
    }

    pub async fn translate_phrase(
        &self,
        Parameters(params): Parameters<TranslationRequest>,
    ) -> McpResult {
        debug!("translate_phrase: {params:?}");

        let translation = self
            .companion
            .translate_phrase(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to translate phrase", &e))?;
        text_result(translation.to_string())
    }

    pub async fn voice_query(&self, Parameters(params): Parameters<VoiceQuery>) -> McpResult {
        debug!("voice_query: {params:?}");

        let reply = self
            .companion
            .voice_query(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to answer query", &e))?;
        text_result(reply.to_string())
    }

    pub async fn get_weather(&self, Parameters(params): Parameters<WeatherLookup>) -> McpResult {
        debug!("get_weather: {params:?}");

        let snapshot = self
            .companion
            .weather(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to fetch weather", &e))?;
        text_result(snapshot.to_string())
    }

    pub fn emergency_info(&self) -> McpResult {
        debug!("emergency_info");
        text_result(EmergencySheet.to_string())
    }

    pub fn darshan_faq(&self, Parameters(params): Parameters<DarshanQuery>) -> McpResult {
        debug!("darshan_faq: {params:?}");
        let guide = DarshanGuide::lookup(params.as_ref().query.as_deref());
        text_result(guide.to_string())
    }

    /// List all available prompts
    pub fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let arguments = request.arguments.unwrap_or_default();
        for arg in &template.arguments {
            match arguments.get(&arg.name) {
                Some(value) if !value.is_string() => {
                    return Err(ErrorData::invalid_params(
                        format!("Argument '{}' must be a string", arg.name),
                        None,
                    ));
                }
                None if arg.required => {
                    return Err(ErrorData::invalid_params(
                        format!("Required argument '{}' is missing", arg.name),
                        None,
                    ));
                }
                _ => {}
            }
        }

        let prompt_text = template.apply(|name| arguments.get(name).and_then(|v| v.as_str()));

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
