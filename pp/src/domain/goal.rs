//! Goal analysis produced by the model

use serde::{Deserialize, Serialize};

use super::{Priority, lenient};

/// A goal broken down into preparation activities
///
/// Only `goal_name` is required. The other fields stay `None` when the model
/// leaves them out, so a stored analysis serializes back to what was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAnalysis {
    /// Short name the model gave the goal; the key in the goal mapping
    #[serde(deserialize_with = "lenient::string")]
    pub goal_name: String,

    /// Activities in the order the model listed them
    #[serde(
        default,
        deserialize_with = "lenient::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub preparation_activities: Option<Vec<PreparationActivity>>,

    /// Estimated total hours, as free text
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_preparation_time: Option<String>,

    /// Recommended preparation timeline, as free text
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_timeline: Option<String>,
}

impl GoalAnalysis {
    /// The activity list, empty when the model gave none
    pub fn activities(&self) -> &[PreparationActivity] {
        self.preparation_activities.as_deref().unwrap_or_default()
    }
}

/// A single preparation task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationActivity {
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_hours",
        serialize_with = "lenient::serialize_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_analysis_deserialize() {
        let json = r#"{
            "goal_name": "Interview Prep",
            "preparation_activities": [
                {"name": "Mock Interviews", "description": "Practice", "estimated_hours": 5, "priority": "high"},
                {"name": "Research Company", "description": "Read up", "estimated_hours": "2", "priority": "Low"}
            ],
            "total_preparation_time": "10",
            "recommended_timeline": "1 week"
        }"#;

        let analysis: GoalAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.goal_name, "Interview Prep");
        assert_eq!(analysis.activities().len(), 2);
        assert_eq!(analysis.activities()[1].estimated_hours, Some(2.0));
        assert_eq!(analysis.activities()[1].priority, Some(Priority::Low));
        assert_eq!(analysis.recommended_timeline.as_deref(), Some("1 week"));
    }

    #[test]
    fn test_omitted_fields_stay_absent() {
        let json = r#"{
            "goal_name": "Marathon",
            "preparation_activities": [{"name": "Long runs"}],
            "total_preparation_time": 40,
            "recommended_timeline": null
        }"#;

        let analysis: GoalAnalysis = serde_json::from_str(json).unwrap();
        let activity = &analysis.activities()[0];
        assert_eq!(activity.description, None);
        assert_eq!(activity.estimated_hours, None);
        assert_eq!(activity.priority, None);
        assert_eq!(analysis.total_preparation_time.as_deref(), Some("40"));
        assert_eq!(analysis.recommended_timeline, None);

        assert_eq!(
            serde_json::to_value(&analysis).unwrap(),
            serde_json::json!({
                "goal_name": "Marathon",
                "preparation_activities": [{"name": "Long runs"}],
                "total_preparation_time": "40"
            })
        );
    }

    #[test]
    fn test_empty_is_not_absent() {
        let analysis: GoalAnalysis =
            serde_json::from_str(r#"{"goal_name": "Recital", "recommended_timeline": ""}"#).unwrap();
        assert_eq!(analysis.recommended_timeline.as_deref(), Some(""));
        assert_eq!(analysis.preparation_activities, None);
        assert!(analysis.activities().is_empty());
    }

    #[test]
    fn test_well_formed_reply_round_trips_exactly() {
        let json = r#"{"goal_name":"Interview Prep","preparation_activities":[{"name":"Mock Interviews","estimated_hours":5,"priority":"high"},{"name":"Reading","estimated_hours":1.5,"priority":"low"}],"total_preparation_time":"10","recommended_timeline":"1 week"}"#;

        let analysis: GoalAnalysis = serde_json::from_str(json).unwrap();
        let expected: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_value(&analysis).unwrap(), expected);
    }

    #[test]
    fn test_missing_goal_name_rejected() {
        let json = r#"{"preparation_activities": []}"#;
        assert!(serde_json::from_str::<GoalAnalysis>(json).is_err());
    }

    #[test]
    fn test_malformed_fields_are_coerced() {
        let json = r#"{
            "goal_name": "Recital",
            "preparation_activities": [
                {"name": "Scales", "estimated_hours": "lots", "priority": "urgent"},
                "practice more",
                {"description": "unnamed"}
            ],
            "total_preparation_time": {"hours": 12}
        }"#;

        let analysis: GoalAnalysis = serde_json::from_str(json).unwrap();
        let activities = analysis.activities();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].estimated_hours, Some(0.0));
        assert_eq!(activities[0].priority, Some(Priority::Medium));
        assert_eq!(activities[1].name, None);
        assert_eq!(analysis.total_preparation_time.as_deref(), Some(r#"{"hours":12}"#));
    }
}
