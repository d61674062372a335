//! prepplanner - turn a preparation goal into a schedule
//!
//! A user describes what they are preparing for. A language model breaks the
//! goal into prioritized activities, then lays those activities out over the
//! coming days around the user's preferences and fixed commitments.
//!
//! # Modules
//!
//! - [`agent`] - the session agent, goal analyzer and schedule generator
//! - [`llm`] - LLM client trait and OpenAI implementation
//! - [`domain`] - analysis, preference and schedule records
//! - [`prompts`] - Handlebars prompt templates
//! - [`render`] - terminal rendering
//! - [`repl`] - interactive session
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod prompts;
pub mod render;
pub mod repl;

// Re-export commonly used types
pub use agent::{AgentError, ModelClient, ModelReply, SchedulingAgent};
pub use config::{Config, LlmConfig};
pub use domain::{GoalAnalysis, Priority, ScheduleResult, UserPreferences};
pub use llm::{LlmClient, LlmError};
