//! Day-by-day schedule produced by the model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Full schedule reply; only `daily_schedules` is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    #[serde(deserialize_with = "lenient::list")]
    pub daily_schedules: Vec<DaySchedule>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_hours",
        serialize_with = "lenient::serialize_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_scheduled_hours: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule_notes: Option<String>,
}

/// One day of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Date as the model wrote it, normally YYYY-MM-DD
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,

    #[serde(default, deserialize_with = "lenient::list")]
    pub activities: Vec<ScheduledActivity>,
}

impl DaySchedule {
    /// The date, if it is a valid YYYY-MM-DD string
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// A time-boxed session on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    #[serde(default, deserialize_with = "lenient::string")]
    pub activity_name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub start_time: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub end_time: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
}
