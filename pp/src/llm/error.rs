//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl LlmError {
    /// Check if this is an authentication problem (missing or rejected key)
    pub fn is_auth(&self) -> bool {
        match self {
            LlmError::MissingApiKey(_) => true,
            LlmError::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Check if the service refused because of quota or rate limits
    pub fn is_quota(&self) -> bool {
        matches!(self, LlmError::ApiError { status: 429, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth() {
        assert!(LlmError::MissingApiKey("OPENAI_API_KEY".to_string()).is_auth());
        assert!(
            LlmError::ApiError {
                status: 401,
                message: "Incorrect API key".to_string()
            }
            .is_auth()
        );
        assert!(
            !LlmError::ApiError {
                status: 500,
                message: "Server error".to_string()
            }
            .is_auth()
        );
        assert!(!LlmError::Timeout(Duration::from_secs(30)).is_auth());
    }

    #[test]
    fn test_is_quota() {
        assert!(
            LlmError::ApiError {
                status: 429,
                message: "You exceeded your current quota".to_string()
            }
            .is_quota()
        );
        assert!(!LlmError::InvalidResponse("Bad JSON".to_string()).is_quota());
    }

    #[test]
    fn test_missing_key_message_names_variable() {
        let err = LlmError::MissingApiKey("MY_KEY".to_string());
        assert_eq!(err.to_string(), "API key not found. Set the MY_KEY environment variable.");
    }
}
