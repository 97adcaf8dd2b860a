//! OpenAI-compatible chat completions backend.
//!
//! The output schema is sent as a `json_schema` response format and tool
//! declarations as function tools. Transcript turns are replayed as an
//! assistant message carrying the tool call followed by a `tool` message
//! with its result.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{GenerationRequest, GenerationResponse, Generator, ToolRequest, Turn};
use crate::{
    config::GenerationConfig,
    error::{Result, ResultExt, YatraError},
};

/// Chat completions client.
#[derive(Clone)]
pub struct OpenAiGenerator {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `YatraError::Configuration` if no API key is configured.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key, &config.base_url, &config.model))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        let mut messages = vec![json!({"role": "user", "content": request.prompt})];
        for turn in &request.transcript {
            match turn {
                Turn::ToolCall(call) => messages.push(json!({
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.arguments.to_string(),
                        }
                    }]
                })),
                Turn::ToolResult { call_id, content, .. } => messages.push(json!({
                    "role": "tool",
                    "tool_call_id": call_id,
                    "content": content.to_string(),
                })),
            }
        }

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.2,
        });

        if let Some(schema) = &request.output_schema {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": request.operation,
                    "schema": schema,
                    "strict": false,
                }
            });
        }

        if !request.tools.is_empty() {
            let tools: Vec<Value> = request
                .tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = Value::Array(tools);
            body["tool_choice"] = json!("auto");
        }

        body
    }
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    /// Arguments arrive as a JSON-encoded string
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    id: String,
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn into_response(completion: Completion) -> Result<GenerationResponse> {
    let message = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| YatraError::generation("backend returned no choices"))?;

    let tool_requests = message
        .tool_calls
        .into_iter()
        .map(|call| {
            let arguments = serde_json::from_str(&call.function.arguments)
                .unwrap_or(Value::String(call.function.arguments));
            ToolRequest {
                id: call.id,
                name: call.function.name,
                arguments,
            }
        })
        .collect();

    let output = message
        .content
        .filter(|content| !content.trim().is_empty())
        .map(|content| {
            serde_json::from_str(strip_code_fence(&content)).unwrap_or(Value::String(content))
        });

    Ok(GenerationResponse {
        output,
        tool_requests,
    })
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let body = self.request_body(request);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .generation_context("backend request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(YatraError::generation(format!(
                "backend returned {status}: {text}"
            )));
        }

        let completion: Completion = response
            .json()
            .await
            .generation_context("could not decode backend response")?;
        let result = into_response(completion)?;
        debug!(
            "'{}' answered with {} tool request(s), output present: {}",
            request.operation,
            result.tool_requests.len(),
            result.output.is_some()
        );
        Ok(result)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        generation::ToolDeclaration,
        test_support::{closed_port, serve, Canned},
    };

    fn generator() -> OpenAiGenerator {
        OpenAiGenerator::new("test-key", "https://example.test/v1/", "gpt-4o-mini")
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::builder().build();
        let err = OpenAiGenerator::from_config(&config.generation).err().unwrap();
        assert!(matches!(err, YatraError::Configuration { .. }));

        let config = Config::builder().with_generation_api_key("k").with_model("m").build();
        let generator = OpenAiGenerator::from_config(&config.generation).unwrap();
        assert_eq!(generator.model_name(), "m");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(generator().endpoint(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_body_replays_tool_transcript() {
        let call = ToolRequest {
            id: "call_1".to_string(),
            name: "getWeather".to_string(),
            arguments: json!({"location": "Srisailam"}),
        };
        let request = GenerationRequest::new("safety_alerts", "prompt")
            .with_output_schema(json!({"type": "object"}))
            .with_tool(ToolDeclaration {
                name: "getWeather".to_string(),
                description: "weather".to_string(),
                parameters: json!({"type": "object"}),
            })
            .continued_with(&call, json!({"temperature": 25.0}));

        let body = generator().request_body(&request);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["tool_calls"][0]["id"], "call_1");
        assert_eq!(
            messages[1]["tool_calls"][0]["function"]["arguments"],
            r#"{"location":"Srisailam"}"#
        );
        assert_eq!(messages[2]["role"], "tool");
        assert_eq!(messages[2]["tool_call_id"], "call_1");
        assert_eq!(body["tools"][0]["function"]["name"], "getWeather");
        assert_eq!(body["response_format"]["json_schema"]["name"], "safety_alerts");
    }

    #[test]
    fn test_parses_fenced_content_and_tool_calls() {
        let completion: Completion = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": "```json\n{\"teluguText\": \"ధన్యవాదాలు\"}\n```",
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "getWeather", "arguments": "{\"location\":\"Kurnool\"}"}
                    }]
                }
            }]
        }))
        .unwrap();

        let response = into_response(completion).unwrap();
        assert_eq!(response.output, Some(json!({"teluguText": "ధన్యవాదాలు"})));
        let call = response.first_tool_request().unwrap();
        assert_eq!(call.id, "call_9");
        assert_eq!(call.arguments["location"], "Kurnool");
    }

    #[test]
    fn test_null_content_has_no_output() {
        let completion: Completion =
            serde_json::from_value(json!({"choices": [{"message": {"content": null}}]})).unwrap();
        let response = into_response(completion).unwrap();
        assert!(response.output.is_none());
        assert!(response.tool_requests.is_empty());
    }

    #[test]
    fn test_no_choices_is_generation_error() {
        let completion: Completion = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            into_response(completion),
            Err(YatraError::Generation { .. })
        ));
    }

    #[tokio::test]
    async fn test_posts_to_chat_completions() {
        let (base_url, requests) = serve(vec![Canned::new(
            200,
            r#"{"choices": [{"message": {"content": "{\"teluguText\": \"నమస్కారం\", \"transliteration\": \"Namaskaram\"}"}}]}"#,
        )])
        .await;
        let generator = OpenAiGenerator::new("test-key", format!("{base_url}/v1"), "gpt-4o-mini");

        let response = generator
            .generate(&GenerationRequest::new("translate_phrase", "Translate 'Hello'"))
            .await
            .expect("completion");
        assert_eq!(response.output.unwrap()["transliteration"], "Namaskaram");

        let requests = requests.await.expect("server task");
        assert_eq!(requests, vec!["POST /v1/chat/completions HTTP/1.1".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_is_generation_error() {
        let (base_url, _requests) =
            serve(vec![Canned::new(503, r#"{"error": {"message": "overloaded"}}"#)]).await;
        let generator = OpenAiGenerator::new("test-key", base_url, "gpt-4o-mini");

        let err = generator
            .generate(&GenerationRequest::new("translate_phrase", "prompt"))
            .await
            .unwrap_err();
        match err {
            YatraError::Generation { message } => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_generation_error() {
        let generator = OpenAiGenerator::new("test-key", closed_port().await, "gpt-4o-mini");

        let err = generator
            .generate(&GenerationRequest::new("translate_phrase", "prompt"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, YatraError::Generation { ref message } if message.contains("backend request failed"))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_generation_error() {
        let (base_url, _requests) = serve(vec![Canned::new(200, "not json")]).await;
        let generator = OpenAiGenerator::new("test-key", base_url, "gpt-4o-mini");

        let err = generator
            .generate(&GenerationRequest::new("translate_phrase", "prompt"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, YatraError::Generation { ref message } if message.contains("could not decode"))
        );
    }
}
