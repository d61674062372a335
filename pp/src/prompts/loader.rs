//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for the goal analysis prompt
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzePromptContext {
    pub goal_description: String,
}

/// Context for the schedule generation prompt
#[derive(Debug, Clone, Serialize)]
pub struct SchedulePromptContext {
    pub goal_name: String,
    pub total_preparation_time: String,
    /// Pretty-printed activity list
    pub activities_json: String,
    /// Pretty-printed preference record (`{}` when none were set)
    pub preferences_json: String,
    pub days: u32,
    /// YYYY-MM-DD
    pub start_date: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    hbs: Handlebars<'static>,
    /// User override directory containing `{name}.pmt` files
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that prefers templates in `override_dir`
    pub fn new(override_dir: Option<impl AsRef<Path>>) -> Self {
        let override_dir = override_dir
            .map(|d| d.as_ref().to_path_buf())
            .filter(|d| d.exists());
        Self {
            hbs: Self::engine(),
            override_dir,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    // Prompts are plain text; HTML escaping would mangle the embedded JSON.
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks the override directory first, then the embedded set.
    pub fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let template = self.load_template(template_name)?;
        debug!(%template_name, "render: called");

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    pub fn analyze_system(&self) -> Result<String> {
        self.load_template("analyze-system")
    }

    pub fn analyze(&self, context: &AnalyzePromptContext) -> Result<String> {
        self.render("analyze", context)
    }

    pub fn schedule_system(&self) -> Result<String> {
        self.load_template("schedule-system")
    }

    pub fn schedule(&self, context: &SchedulePromptContext) -> Result<String> {
        self.render("schedule", context)
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}
