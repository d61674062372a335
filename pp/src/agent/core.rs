//! SchedulingAgent - owns one session's goals, preferences and schedule
//!
//! The agent is the context object for a single user session. It drives the
//! analyzer and generator and keeps their results in three stores:
//!
//! - goal mapping: goal name → analysis, overwritten when a name recurs
//! - preferences: replaced wholesale on every save
//! - schedule: the day list of the last successful generation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::{AgentError, GoalAnalyzer, ModelClient, ScheduleGenerator};
use crate::config::Config;
use crate::domain::{DaySchedule, GoalAnalysis, ScheduleResult, UserPreferences};
use crate::llm::{LlmClient, LlmError, create_client};
use crate::prompts::PromptLoader;

/// Default number of days to schedule
pub const DEFAULT_DAYS: u32 = 7;

pub struct SchedulingAgent {
    model: ModelClient,
    analyzer: GoalAnalyzer,
    generator: ScheduleGenerator,
    goals: BTreeMap<String, GoalAnalysis>,
    preferences: Option<UserPreferences>,
    schedule: Vec<DaySchedule>,
}

impl SchedulingAgent {
    /// Create an agent over an LLM client, using the embedded prompts
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self::with_prompts(ModelClient::new(llm), PromptLoader::embedded_only())
    }

    pub fn with_prompts(model: ModelClient, prompts: PromptLoader) -> Self {
        let prompts = Arc::new(prompts);
        Self {
            model,
            analyzer: GoalAnalyzer::new(prompts.clone()),
            generator: ScheduleGenerator::new(prompts),
            goals: BTreeMap::new(),
            preferences: None,
            schedule: Vec::new(),
        }
    }

    /// Build an agent from configuration
    ///
    /// Fails with `LlmError::MissingApiKey` when no credential is available;
    /// callers treat that as "not initialized" rather than a crash.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let resolved = config.llm.resolve();
        let llm = create_client(&resolved)?;
        let model = ModelClient::new(llm)
            .with_max_tokens(resolved.max_tokens)
            .with_temperature(resolved.temperature);
        let prompts = PromptLoader::new(config.prompts.expanded_dir());
        Ok(Self::with_prompts(model, prompts))
    }

    /// Analyze a goal description and remember the result under its name
    ///
    /// Nothing is stored unless the reply carries a goal name.
    pub async fn analyze_goal(&mut self, description: &str) -> Result<GoalAnalysis, AgentError> {
        debug!("analyze_goal: called");
        let analysis = self.analyzer.analyze(&self.model, description).await?;

        if self
            .goals
            .insert(analysis.goal_name.clone(), analysis.clone())
            .is_some()
        {
            info!(goal = %analysis.goal_name, "Replaced existing goal analysis");
        }
        Ok(analysis)
    }

    /// Replace the stored preferences
    pub fn collect_user_preferences(&mut self, preferences: UserPreferences) {
        debug!(name = %preferences.name, "collect_user_preferences: called");
        self.preferences = Some(preferences);
    }

    /// Generate a schedule for an analyzed goal starting today
    pub async fn generate_schedule(&mut self, goal_name: &str, days: u32) -> Result<ScheduleResult, AgentError> {
        self.generate_schedule_from(goal_name, days, Local::now().date_naive())
            .await
    }

    /// Generate a schedule for an analyzed goal starting on `start_date`
    ///
    /// An unknown goal is rejected before any model call. On success the
    /// stored schedule is replaced by the returned day list.
    pub async fn generate_schedule_from(
        &mut self,
        goal_name: &str,
        days: u32,
        start_date: NaiveDate,
    ) -> Result<ScheduleResult, AgentError> {
        debug!(%goal_name, %days, "generate_schedule_from: called");
        let goal = self
            .goals
            .get(goal_name)
            .ok_or_else(|| AgentError::GoalNotFound(goal_name.to_string()))?;

        let result = self
            .generator
            .generate(&self.model, goal, self.preferences.as_ref(), days, start_date)
            .await?;

        self.schedule = result.daily_schedules.clone();
        Ok(result)
    }

    /// Analyzed goals by name
    pub fn goals(&self) -> &BTreeMap<String, GoalAnalysis> {
        &self.goals
    }

    pub fn goal(&self, goal_name: &str) -> Option<&GoalAnalysis> {
        self.goals.get(goal_name)
    }

    pub fn preferences(&self) -> Option<&UserPreferences> {
        self.preferences.as_ref()
    }

    /// Day list of the last generated schedule
    pub fn schedule(&self) -> &[DaySchedule] {
        &self.schedule
    }
}
