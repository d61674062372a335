//! ScheduleGenerator - asks the model to pack activities into days
//!
//! Placement, ordering, breaks and overload avoidance are left entirely to the
//! model. The reply is not checked against the requested day count.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{AgentError, ModelClient};
use crate::domain::{GoalAnalysis, ScheduleResult, UserPreferences};
use crate::prompts::{PromptLoader, SchedulePromptContext};

/// Key a reply must carry to count as a schedule
pub const DAILY_SCHEDULES_FIELD: &str = "daily_schedules";

/// Builds the scheduling prompt and interprets the reply
pub struct ScheduleGenerator {
    prompts: Arc<PromptLoader>,
}

impl ScheduleGenerator {
    pub fn new(prompts: Arc<PromptLoader>) -> Self {
        Self { prompts }
    }

    /// Render the (system instruction, user prompt) pair
    pub fn build_prompts(
        &self,
        goal: &GoalAnalysis,
        preferences: Option<&UserPreferences>,
        days: u32,
        start_date: NaiveDate,
    ) -> Result<(String, String), AgentError> {
        let to_prompt_err = |e: serde_json::Error| AgentError::Prompt(e.to_string());

        let activities_json = serde_json::to_string_pretty(goal.activities()).map_err(to_prompt_err)?;
        let preferences_json = match preferences {
            Some(prefs) => serde_json::to_string_pretty(prefs).map_err(to_prompt_err)?,
            None => "{}".to_string(),
        };
        let total_preparation_time = match goal.total_preparation_time.as_deref().map(str::trim) {
            Some(total) if !total.is_empty() => total.to_string(),
            _ => "0".to_string(),
        };

        let context = SchedulePromptContext {
            goal_name: goal.goal_name.clone(),
            total_preparation_time,
            activities_json,
            preferences_json,
            days,
            start_date: start_date.format("%Y-%m-%d").to_string(),
        };

        let system = self
            .prompts
            .schedule_system()
            .map_err(|e| AgentError::Prompt(e.to_string()))?;
        let prompt = self
            .prompts
            .schedule(&context)
            .map_err(|e| AgentError::Prompt(e.to_string()))?;
        Ok((system, prompt))
    }

    /// Ask the model for a `days`-day schedule for `goal`
    pub async fn generate(
        &self,
        model: &ModelClient,
        goal: &GoalAnalysis,
        preferences: Option<&UserPreferences>,
        days: u32,
        start_date: NaiveDate,
    ) -> Result<ScheduleResult, AgentError> {
        debug!(goal = %goal.goal_name, %days, "generate: called");
        if days == 0 {
            return Err(AgentError::InvalidDays(days));
        }

        let (system, prompt) = self.build_prompts(goal, preferences, days, start_date)?;

        let reply = model.get_default_response(&prompt, &system).await;
        let result: ScheduleResult = reply.decode(DAILY_SCHEDULES_FIELD)?;

        info!(
            goal = %goal.goal_name,
            requested_days = days,
            returned_days = result.daily_schedules.len(),
            "Schedule generated"
        );
        Ok(result)
    }
}
