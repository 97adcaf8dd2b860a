//! Tool-augmented safety-alert flow.
//!
//! The backend is first asked for an alert with the weather tool declared. It
//! must answer with a tool request; the flow runs the weather lookup itself,
//! replays the call and its result, and asks again for the final alert.
//!
//! ```text
//! Initial ──submit──▶ CapabilityRequested ──weather──▶ CapabilityExecuted
//!                                                            │
//!                    Final ◀──validate── Resumed ◀──submit───┘
//! ```
//!
//! Each transition is one [`SafetyFlow::advance`] call. Any failure ends the
//! flow; there is no retry and no partial result.

use log::debug;
use serde_json::{json, Value};

use crate::{
    contract::SafetyAlertContract,
    error::{Result, YatraError},
    generation::{GenerationRequest, Invoker, ToolDeclaration, ToolRequest},
    models::{SafetyAlert, WeatherSnapshot},
    params::SafetyAlertRequest,
    weather::WeatherGateway,
};

/// Name of the weather tool declared to the backend.
pub const WEATHER_TOOL: &str = "getWeather";

/// Declaration of the weather tool.
pub fn weather_tool() -> ToolDeclaration {
    ToolDeclaration {
        name: WEATHER_TOOL.to_string(),
        description: "Get the current weather for a given location.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city or area to get the weather for."
                }
            },
            "required": ["location"]
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SafetyFlowState {
    /// Nothing submitted yet
    Initial { input: SafetyAlertRequest },
    /// Backend asked for the weather tool
    CapabilityRequested {
        request: GenerationRequest,
        call: ToolRequest,
    },
    /// Weather lookup done, result not yet sent back
    CapabilityExecuted {
        request: GenerationRequest,
        call: ToolRequest,
        snapshot: WeatherSnapshot,
    },
    /// Backend answered the continuation
    Resumed { output: Option<Value> },
    Final(SafetyAlert),
}

impl SafetyFlowState {
    pub fn is_final(&self) -> bool {
        matches!(self, SafetyFlowState::Final(_))
    }
}

/// Drives [`SafetyFlowState`] transitions against the backend and gateway.
pub struct SafetyFlow<'a> {
    invoker: &'a Invoker,
    weather: &'a WeatherGateway,
}

impl<'a> SafetyFlow<'a> {
    pub fn new(invoker: &'a Invoker, weather: &'a WeatherGateway) -> Self {
        Self { invoker, weather }
    }

    /// Initial state for `input`.
    pub fn start(&self, input: &SafetyAlertRequest) -> SafetyFlowState {
        SafetyFlowState::Initial {
            input: input.clone(),
        }
    }

    /// Performs exactly one transition.
    ///
    /// # Errors
    ///
    /// - `YatraError::Protocol` if the first answer carries no tool request,
    ///   names an unknown tool, or lacks a location argument
    /// - `YatraError::Generation` if the continuation has no final output
    /// - `YatraError::SchemaMismatch` if the final output is not an alert
    /// - any weather gateway error from the lookup
    pub async fn advance(&self, state: SafetyFlowState) -> Result<SafetyFlowState> {
        match state {
            SafetyFlowState::Initial { input } => {
                let request = self
                    .invoker
                    .request_for::<SafetyAlertContract>(&input)?
                    .with_tool(weather_tool());
                let response = self.invoker.submit(&request).await?;
                let call = response.tool_requests.into_iter().next().ok_or_else(|| {
                    YatraError::protocol("expected a tool request to get weather data")
                })?;
                if call.name != WEATHER_TOOL {
                    return Err(YatraError::protocol(format!(
                        "backend requested unknown tool '{}'",
                        call.name
                    )));
                }
                Ok(SafetyFlowState::CapabilityRequested { request, call })
            }
            SafetyFlowState::CapabilityRequested { request, call } => {
                let location = requested_location(&call)?;
                debug!("Running {WEATHER_TOOL} for {location}");
                let snapshot = self.weather.lookup(location).await?;
                Ok(SafetyFlowState::CapabilityExecuted {
                    request,
                    call,
                    snapshot,
                })
            }
            SafetyFlowState::CapabilityExecuted {
                request,
                call,
                snapshot,
            } => {
                let content = serde_json::to_value(&snapshot)?;
                let continuation = request.continued_with(&call, content);
                let response = self.invoker.submit(&continuation).await?;
                Ok(SafetyFlowState::Resumed {
                    output: response.output,
                })
            }
            SafetyFlowState::Resumed { output } => {
                let output = output.ok_or_else(|| {
                    YatraError::generation("could not generate safety alerts: no final output")
                })?;
                let alert = self.invoker.accept::<SafetyAlertContract>(output)?;
                Ok(SafetyFlowState::Final(alert))
            }
            done @ SafetyFlowState::Final(_) => Ok(done),
        }
    }

    /// Runs the flow to completion.
    pub async fn run(&self, input: &SafetyAlertRequest) -> Result<SafetyAlert> {
        let mut state = self.start(input);
        loop {
            state = match self.advance(state).await? {
                SafetyFlowState::Final(alert) => return Ok(alert),
                next => next,
            };
        }
    }
}

fn requested_location(call: &ToolRequest) -> Result<&str> {
    call.arguments
        .get("location")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .ok_or_else(|| {
            YatraError::protocol(format!(
                "{WEATHER_TOOL} call '{}' has no location argument",
                call.id
            ))
        })
}
