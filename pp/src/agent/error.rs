//! Agent error types
//!
//! Every failure of the core is returned as one of these values; none of them
//! are raised past the agent boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// Scheduling was requested for a goal that was never analyzed
    #[error("Goal '{0}' not found. Please analyze this goal first.")]
    GoalNotFound(String),

    #[error("Cannot schedule {0} days; request at least one")]
    InvalidDays(u32),

    /// The model answered with something that is not a JSON object
    #[error("Model reply was not JSON")]
    ParseFailure { raw: String },

    /// The model answered with JSON lacking a required key
    #[error("Model reply is missing required field '{field}'")]
    SchemaMismatch { field: String, reply: serde_json::Value },

    /// Network, auth or quota failure talking to the service
    #[error("Model request failed: {0}")]
    Transport(String),

    #[error("Failed to build prompt: {0}")]
    Prompt(String),
}

impl AgentError {
    /// Raw model text carried by a parse failure
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            AgentError::ParseFailure { raw } => Some(raw),
            _ => None,
        }
    }
}
