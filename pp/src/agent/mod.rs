//! Agent module - goal analysis and schedule generation
//!
//! # Architecture
//!
//! ```text
//! description → GoalAnalyzer ─┐                ┌→ goal mapping
//!                             ├→ ModelClient ──┤
//! preferences → ScheduleGenerator ┘            └→ schedule
//!                      ↑
//!               SchedulingAgent (one per session)
//! ```
//!
//! The model does all of the reasoning. This module builds prompts, makes one
//! call per operation, and turns the reply into typed data or an `AgentError`.

mod analyzer;
mod core;
mod error;
mod generator;
mod model;

pub use analyzer::{GOAL_NAME_FIELD, GoalAnalyzer};
pub use core::{DEFAULT_DAYS, SchedulingAgent};
pub use error::AgentError;
pub use generator::{DAILY_SCHEDULES_FIELD, ScheduleGenerator};
pub use model::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ModelClient, ModelReply};
