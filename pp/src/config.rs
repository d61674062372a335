//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::{DEFAULT_DAYS, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::llm::LlmError;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Prompt template configuration
    pub prompts: PromptsConfig,

    /// Schedule generation defaults
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// The API key is not checked here; a session without one still starts,
    /// uninitialized.
    pub fn validate(&self) -> Result<()> {
        if self.schedule.max_days == 0 {
            return Err(eyre::eyre!("schedule.max-days must be at least 1"));
        }
        if self.schedule.default_days == 0 || self.schedule.default_days > self.schedule.max_days {
            return Err(eyre::eyre!(
                "schedule.default-days must be between 1 and {}, got {}",
                self.schedule.max_days,
                self.schedule.default_days
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(eyre::eyre!("llm.max-tokens must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .prepplanner.yml
        let local_config = PathBuf::from(".prepplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/prepplanner/prepplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("prepplanner").join("prepplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable that, when set, overrides `model`
    #[serde(rename = "model-env")]
    pub model_env: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Default sampling temperature
    pub temperature: f32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            model_env: "OPENAI_MODEL".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Apply the environment model override
    pub fn resolve(&self) -> ResolvedLlmConfig {
        let model = std::env::var(&self.model_env)
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.model.clone());

        ResolvedLlmConfig {
            provider: self.provider.clone(),
            model,
            api_key_env: self.api_key_env.clone(),
            base_url: self.base_url.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout_ms: self.timeout_ms,
        }
    }
}

/// LLM configuration with environment overrides applied
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory with `.pmt` overrides for the embedded templates
    pub dir: Option<PathBuf>,
}

impl PromptsConfig {
    /// Expand a leading `~/` in the override directory
    pub fn expanded_dir(&self) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        match dir.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(dir.clone()),
        }
    }
}

/// Schedule generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Days to schedule when none are given
    #[serde(rename = "default-days")]
    pub default_days: u32,

    /// Largest day count the CLI accepts
    #[serde(rename = "max-days")]
    pub max_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_DAYS,
            max_days: 14,
        }
    }
}
