//! User scheduling preferences
//!
//! Stored and forwarded to the model as-is. Nothing here checks that the wake
//! time precedes the sleep time or that the times parse at all.

use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Scheduling constraints supplied by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub name: String,
    pub time_constraints: TimeConstraints,
    pub productive_time: ProductiveTime,
    pub session_length_minutes: u32,
    pub commitments: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            name: String::new(),
            time_constraints: TimeConstraints::default(),
            productive_time: ProductiveTime::Morning,
            session_length_minutes: 60,
            commitments: Vec::new(),
        }
    }
}

impl UserPreferences {
    /// Load preferences from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).context(format!("Failed to parse preferences in {}", path.display()))
    }

    /// YAML skeleton with the default values filled in
    pub fn template() -> Result<String> {
        let example = Self {
            commitments: vec![
                "Work 9 AM - 5 PM Monday-Friday".to_string(),
                "Gym 6 PM - 7 PM Tuesday, Thursday".to_string(),
            ],
            ..Default::default()
        };
        serde_yaml::to_string(&example).context("Failed to serialize preferences template")
    }
}

/// Wake and sleep times, free text such as "7:00 AM"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConstraints {
    pub wake_time: String,
    pub sleep_time: String,
}

impl Default for TimeConstraints {
    fn default() -> Self {
        Self {
            wake_time: "7:00 AM".to_string(),
            sleep_time: "11:00 PM".to_string(),
        }
    }
}

/// Part of the day the user works best in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProductiveTime {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl ProductiveTime {
    pub const ALL: [ProductiveTime; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];
}

impl std::fmt::Display for ProductiveTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "Morning"),
            Self::Afternoon => write!(f, "Afternoon"),
            Self::Evening => write!(f, "Evening"),
            Self::Night => write!(f, "Night"),
        }
    }
}

impl std::str::FromStr for ProductiveTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(format!("Unknown productive time: {}. Use: Morning, Afternoon, Evening, Night", s)),
        }
    }
}

impl TryFrom<String> for ProductiveTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Split a block of text into commitments, one per non-blank line
pub fn parse_commitments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
