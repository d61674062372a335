//! LLM request/response types
//!
//! Modelled on the chat-completions shape: one system prompt and one user
//! prompt, a sampling temperature and a token cap.

use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction sent ahead of the prompt
    pub system_prompt: String,

    /// The single user turn
    pub prompt: String,

    /// Max tokens for response (capped by config)
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

impl StopReason {
    /// Parse from an OpenAI `finish_reason` string
    pub fn from_openai(s: &str) -> Self {
        debug!(%s, "StopReason::from_openai: called");
        match s {
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_from_openai() {
        assert_eq!(StopReason::from_openai("stop"), StopReason::EndTurn);
        assert_eq!(StopReason::from_openai("length"), StopReason::MaxTokens);
        assert_eq!(StopReason::from_openai("content_filter"), StopReason::ContentFilter);
        assert_eq!(StopReason::from_openai("something_new"), StopReason::EndTurn);
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 30,
        };
        assert_eq!(usage.total(), 150);
    }
}
