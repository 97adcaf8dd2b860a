//! Prompt assembly and the generative backend.
//!
//! The backend is an injected capability: anything implementing
//! [`Generator`] can serve the companion. Requests carry a rendered prompt,
//! the JSON schema the answer must follow, any tools the backend may ask to
//! have executed, and the transcript of earlier turns when a call continues a
//! previous one.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ PromptLibrary│──▶│   Invoker    │──▶│ dyn Generator    │
//! │ (handlebars) │   │ (contracts)  │   │ (OpenAI/Scripted)│
//! └──────────────┘   └──────────────┘   └──────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`prompt`]: instruction templates and their rendering
//! - [`invoker`]: contract-checked generation calls
//! - [`openai`]: OpenAI-compatible chat completions backend
//! - [`scripted`]: deterministic backend that replays queued responses

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub mod invoker;
pub mod openai;
pub mod prompt;
pub mod scripted;

pub use invoker::Invoker;
pub use openai::OpenAiGenerator;
pub use prompt::PromptLibrary;
pub use scripted::ScriptedGenerator;

/// External capability the backend may ask to have executed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments
    pub parameters: Value,
}

/// A backend's request to execute a declared tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    /// Backend-assigned call id, echoed back with the result
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Earlier turn replayed to the backend when continuing a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    /// The backend asked for a tool
    ToolCall(ToolRequest),
    /// The tool's result, matched to its call by id
    ToolResult {
        call_id: String,
        name: String,
        content: Value,
    },
}

/// One call to the generative backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub operation: String,
    pub prompt: String,
    /// Required shape of the final answer
    pub output_schema: Option<Value>,
    pub tools: Vec<ToolDeclaration>,
    pub transcript: Vec<Turn>,
}

impl GenerationRequest {
    pub fn new(operation: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            prompt: prompt.into(),
            output_schema: None,
            tools: Vec::new(),
            transcript: Vec::new(),
        }
    }

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn with_tool(mut self, tool: ToolDeclaration) -> Self {
        self.tools.push(tool);
        self
    }

    /// Continuation of this request after `call` returned `content`.
    pub fn continued_with(&self, call: &ToolRequest, content: Value) -> Self {
        let mut next = self.clone();
        next.transcript.push(Turn::ToolCall(call.clone()));
        next.transcript.push(Turn::ToolResult {
            call_id: call.id.clone(),
            name: call.name.clone(),
            content,
        });
        next
    }
}

/// What the backend answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    /// Structured answer, if the backend produced one
    pub output: Option<Value>,
    pub tool_requests: Vec<ToolRequest>,
}

impl GenerationResponse {
    pub fn output(output: Value) -> Self {
        Self {
            output: Some(output),
            tool_requests: Vec::new(),
        }
    }

    pub fn tool_request(request: ToolRequest) -> Self {
        Self {
            output: None,
            tool_requests: vec![request],
        }
    }

    /// First tool request, if any.
    pub fn first_tool_request(&self) -> Option<&ToolRequest> {
        self.tool_requests.first()
    }
}

/// Generative text backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Submit one request.
    ///
    /// Implementations fail with `YatraError::Generation` on transport
    /// errors. They do not validate the output against its schema; that is
    /// the invoker's job.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}
