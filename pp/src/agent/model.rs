//! Model client: one call to the text-generation service
//!
//! `get_response` never fails. The outcome of the call is a `ModelReply`
//! that callers inspect: structured JSON, raw text, or a transport failure.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::AgentError;
use crate::llm::{CompletionRequest, LlmClient, LlmError, StopReason};

/// Sampling temperature used when callers do not choose one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion length cap for every call
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// What came back from one model call
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// The reply parsed as a JSON object
    Structured(Map<String, Value>),
    /// The reply was not a JSON object; the text is kept verbatim
    Text(String),
    /// The request itself failed
    TransportError(String),
}

impl ModelReply {
    /// Classify raw completion text
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<Value>(strip_code_fence(&text)) {
            Ok(Value::Object(map)) => ModelReply::Structured(map),
            _ => ModelReply::Text(text),
        }
    }

    /// Convert into `T`, requiring `required_field` to be present
    pub fn decode<T: DeserializeOwned>(self, required_field: &str) -> Result<T, AgentError> {
        match self {
            ModelReply::Structured(map) => {
                if !map.contains_key(required_field) {
                    return Err(AgentError::SchemaMismatch {
                        field: required_field.to_string(),
                        reply: Value::Object(map),
                    });
                }
                let reply = Value::Object(map);
                serde_json::from_value(reply.clone()).map_err(|e| {
                    debug!(error = %e, "decode: coercion failed");
                    AgentError::SchemaMismatch {
                        field: required_field.to_string(),
                        reply,
                    }
                })
            }
            ModelReply::Text(raw) => Err(AgentError::ParseFailure { raw }),
            ModelReply::TransportError(message) => Err(AgentError::Transport(message)),
        }
    }
}

/// Strip a surrounding Markdown code fence (```json ... ```), if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

/// Error text for a failed request, with a hint for key and quota problems
fn transport_message(error: &LlmError) -> String {
    if error.is_auth() {
        format!("{} (check your OpenAI API key)", error)
    } else if error.is_quota() {
        format!("{} (quota or rate limit reached; try again later)", error)
    } else {
        error.to_string()
    }
}

/// Boundary component issuing requests to the external service
#[derive(Clone)]
pub struct ModelClient {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
    temperature: f32,
}

impl ModelClient {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature `get_default_response` uses
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Send the system instruction and prompt as a two-turn exchange
    ///
    /// Exactly one request is made. Failures are reported in the reply.
    pub async fn get_response(&self, prompt: &str, system_instruction: &str, temperature: f32) -> ModelReply {
        debug!(prompt_len = prompt.len(), %temperature, "get_response: called");
        let request = CompletionRequest {
            system_prompt: system_instruction.to_string(),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature,
        };

        match self.llm.complete(request).await {
            Ok(response) => {
                debug!(usage = response.usage.total(), "get_response: completed");
                match response.stop_reason {
                    StopReason::ContentFilter => {
                        warn!("get_response: reply withheld by content filter");
                        return ModelReply::TransportError("Reply withheld by the content filter".to_string());
                    }
                    StopReason::MaxTokens => {
                        warn!(max_tokens = self.max_tokens, "get_response: reply truncated at max tokens");
                    }
                    StopReason::EndTurn => {}
                }
                let reply = ModelReply::from_text(response.content.unwrap_or_default());
                if let ModelReply::Text(_) = reply {
                    warn!("get_response: reply was not a JSON object");
                }
                reply
            }
            Err(e) => {
                warn!(error = %e, "get_response: request failed");
                ModelReply::TransportError(transport_message(&e))
            }
        }
    }

    /// `get_response` at the configured default temperature
    pub async fn get_default_response(&self, prompt: &str, system_instruction: &str) -> ModelReply {
        self.get_response(prompt, system_instruction, self.temperature).await
    }
}
