//! GoalAnalyzer - asks the model to break a goal into preparation activities

use std::sync::Arc;

use tracing::{debug, info};

use super::{AgentError, ModelClient};
use crate::domain::GoalAnalysis;
use crate::prompts::{AnalyzePromptContext, PromptLoader};

/// Key a reply must carry to count as an analysis
pub const GOAL_NAME_FIELD: &str = "goal_name";

/// Builds the analysis prompt and interprets the reply
pub struct GoalAnalyzer {
    prompts: Arc<PromptLoader>,
}

impl GoalAnalyzer {
    pub fn new(prompts: Arc<PromptLoader>) -> Self {
        Self { prompts }
    }

    /// Render the (system instruction, user prompt) pair for a description
    ///
    /// An empty description is passed through unchanged.
    pub fn build_prompts(&self, description: &str) -> Result<(String, String), AgentError> {
        let system = self
            .prompts
            .analyze_system()
            .map_err(|e| AgentError::Prompt(e.to_string()))?;
        let prompt = self
            .prompts
            .analyze(&AnalyzePromptContext {
                goal_description: description.to_string(),
            })
            .map_err(|e| AgentError::Prompt(e.to_string()))?;
        Ok((system, prompt))
    }

    /// Ask the model for an analysis of `description`
    pub async fn analyze(&self, model: &ModelClient, description: &str) -> Result<GoalAnalysis, AgentError> {
        debug!(description_len = description.len(), "analyze: called");
        let (system, prompt) = self.build_prompts(description)?;

        let reply = model.get_default_response(&prompt, &system).await;
        let analysis: GoalAnalysis = reply.decode(GOAL_NAME_FIELD)?;

        info!(
            goal = %analysis.goal_name,
            activities = analysis.activities().len(),
            "Goal analyzed"
        );
        Ok(analysis)
    }
}
