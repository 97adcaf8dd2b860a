use std::sync::Arc;

use log::debug;
use serde_json::Value;

use super::{GenerationRequest, GenerationResponse, Generator, PromptLibrary};
use crate::{
    contract::{output_schema, parse_output, Contract},
    error::{Result, YatraError},
};

/// Renders prompts and submits them to the backend, accepting only answers
/// that satisfy the operation's contract.
///
/// Stateless apart from its shared handles; concurrent calls are independent.
#[derive(Clone)]
pub struct Invoker {
    generator: Arc<dyn Generator>,
    prompts: Arc<PromptLibrary>,
}

impl Invoker {
    pub fn new(generator: Arc<dyn Generator>, prompts: Arc<PromptLibrary>) -> Self {
        Self { generator, prompts }
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Builds the backend request for contract `C`: rendered prompt plus the
    /// output schema.
    pub fn request_for<C: Contract>(&self, input: &C::Input) -> Result<GenerationRequest> {
        let prompt = self.prompts.render(C::TEMPLATE, input)?;
        Ok(GenerationRequest::new(C::OPERATION, prompt).with_output_schema(output_schema::<C>()?))
    }

    /// One-shot generation: render, submit once, validate.
    ///
    /// # Errors
    ///
    /// - `YatraError::Generation` if the backend fails or returns no output
    /// - `YatraError::SchemaMismatch` if the output does not fit `C::Output`
    pub async fn generate<C: Contract>(&self, input: &C::Input) -> Result<C::Output> {
        let request = self.request_for::<C>(input)?;
        let response = self.submit(&request).await?;
        let output = response.output.ok_or_else(|| {
            YatraError::generation(format!("backend returned no output for '{}'", C::OPERATION))
        })?;
        parse_output::<C>(output)
    }

    /// Raw submission, used by multi-step flows that inspect tool requests.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        debug!(
            "Submitting '{}' to {} ({} transcript turns, {} tools)",
            request.operation,
            self.generator.model_name(),
            request.transcript.len(),
            request.tools.len()
        );
        self.generator.generate(request).await
    }

    /// Validates a raw final answer against contract `C`.
    pub fn accept<C: Contract>(&self, output: Value) -> Result<C::Output> {
        parse_output::<C>(output)
    }
}
