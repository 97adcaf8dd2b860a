//! Deterministic backend for tests and offline runs.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{GenerationRequest, GenerationResponse, Generator, ToolRequest};
use crate::error::{Result, YatraError};

/// Replays queued responses in order and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<GenerationResponse>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a final structured answer.
    pub fn then_output(self, output: Value) -> Self {
        self.push(Ok(GenerationResponse::output(output)))
    }

    /// Queue a tool request.
    pub fn then_tool_call(self, id: &str, name: &str, arguments: Value) -> Self {
        self.push(Ok(GenerationResponse::tool_request(ToolRequest {
            id: id.to_string(),
            name: name.to_string(),
            arguments,
        })))
    }

    /// Queue an arbitrary response.
    pub fn then_response(self, response: GenerationResponse) -> Self {
        self.push(Ok(response))
    }

    /// Queue a backend failure.
    pub fn then_error(self, message: &str) -> Self {
        self.push(Err(YatraError::generation(message)))
    }

    fn push(self, response: Result<GenerationResponse>) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.requests
            .lock()
            .map_err(|_| YatraError::generation("scripted generator lock poisoned"))?
            .push(request.clone());

        self.responses
            .lock()
            .map_err(|_| YatraError::generation("scripted generator lock poisoned"))?
            .pop_front()
            .unwrap_or_else(|| {
                Err(YatraError::generation(format!(
                    "no scripted response left for '{}'",
                    request.operation
                )))
            })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let generator = ScriptedGenerator::new()
            .then_tool_call("call_1", "getWeather", json!({"location": "Srisailam"}))
            .then_output(json!({"ok": true}));

        let first = generator
            .generate(&GenerationRequest::new("safety_alerts", "first"))
            .await
            .unwrap();
        assert_eq!(first.first_tool_request().unwrap().name, "getWeather");

        let second = generator
            .generate(&GenerationRequest::new("safety_alerts", "second"))
            .await
            .unwrap();
        assert_eq!(second.output, Some(json!({"ok": true})));

        let prompts: Vec<String> = generator.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["first", "second"]);
        assert_eq!(generator.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_generation_error() {
        let generator = ScriptedGenerator::new();
        let err = generator
            .generate(&GenerationRequest::new("translate_phrase", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, YatraError::Generation { .. }));
    }
}
