//! LLM client module
//!
//! Provides the transport boundary to the external text-generation service.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};

use crate::config::ResolvedLlmConfig;

/// Create an LLM client based on the provider named in the resolved config
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: openai",
                other
            )))
        }
    }
}
