//! Terminal rendering for analyses and schedules

use std::fmt::Write;

use colored::Colorize;

use crate::domain::{DaySchedule, GoalAnalysis, Priority, ScheduleResult};

/// Format hours without a trailing `.0`
pub fn fmt_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{:.1}", hours)
    }
}

fn or_unknown(text: Option<&str>) -> &str {
    match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => "Unknown",
    }
}

fn priority_label(priority: Priority) -> String {
    let label = format!("{} priority", priority);
    match priority {
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.dimmed().to_string(),
    }
}

/// Render a goal analysis
pub fn render_analysis(analysis: &GoalAnalysis) -> String {
    let mut out = String::new();
    let title = if analysis.goal_name.trim().is_empty() {
        "Your Goal"
    } else {
        analysis.goal_name.as_str()
    };
    let _ = writeln!(out, "{}", title.bright_cyan().bold());

    if !analysis.activities().is_empty() {
        let _ = writeln!(out, "Preparation Activities:");
        for activity in analysis.activities() {
            let name = activity.name.as_deref().unwrap_or("Unnamed activity");
            let mut line = format!("- {}", name.bold());
            if let Some(hours) = activity.estimated_hours {
                let _ = write!(line, ": {} hours", fmt_hours(hours));
            }
            if let Some(priority) = activity.priority {
                let _ = write!(line, " ({})", priority_label(priority));
            }
            let _ = writeln!(out, "{}", line);
            if let Some(description) = activity.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "    {}", description.dimmed());
            }
        }
    }

    let _ = writeln!(
        out,
        "Total Preparation Time: {}",
        or_unknown(analysis.total_preparation_time.as_deref())
    );
    let _ = writeln!(
        out,
        "Recommended Timeline: {}",
        or_unknown(analysis.recommended_timeline.as_deref())
    );
    out
}

/// Render the one-line outcome of a generation
pub fn render_schedule_summary(result: &ScheduleResult) -> String {
    let mut out = String::new();
    let hours = result.total_scheduled_hours.map(fmt_hours);
    let _ = writeln!(out, "Total scheduled hours: {}", or_unknown(hours.as_deref()));
    if let Some(notes) = result.schedule_notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "{}", notes.italic());
    }
    out
}

/// Render the day list
pub fn render_schedule(days: &[DaySchedule]) -> String {
    let mut out = String::new();
    for day in days {
        let heading = match day.parsed_date() {
            Some(date) => format!("{} ({})", day.date, date.format("%A")),
            None if day.date.trim().is_empty() => "Unknown date".to_string(),
            None => day.date.clone(),
        };
        let _ = writeln!(out, "{}", heading.bright_cyan().bold());

        if day.activities.is_empty() {
            let _ = writeln!(out, "No activities scheduled for this day.");
        }
        for activity in &day.activities {
            let _ = writeln!(
                out,
                "{} - {}: {}",
                activity.start_time.bold(),
                activity.end_time.bold(),
                activity.activity_name
            );
            if !activity.notes.is_empty() {
                let _ = writeln!(out, "    {}", activity.notes.italic());
            }
        }
        let _ = writeln!(out, "{}", "---".dimmed());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_fmt_hours() {
        assert_eq!(fmt_hours(5.0), "5");
        assert_eq!(fmt_hours(2.5), "2.5");
        assert_eq!(fmt_hours(0.0), "0");
    }

    #[test]
    fn test_fmt_hours_huge_values_do_not_saturate() {
        let text = fmt_hours(1e30);
        assert!(text.starts_with("1000000000000000"));
        assert_eq!(text.len(), 31);
        assert_ne!(text, i64::MAX.to_string());
        assert_eq!(fmt_hours(-3.0), "-3");
    }

    #[test]
    fn test_render_analysis() {
        plain();
        let analysis: GoalAnalysis = serde_json::from_str(
            r#"{"goal_name":"Interview Prep","preparation_activities":[{"name":"Mock Interviews","estimated_hours":5,"priority":"high"}],"total_preparation_time":"10","recommended_timeline":"1 week"}"#,
        )
        .unwrap();

        let text = render_analysis(&analysis);
        assert!(text.contains("Interview Prep"));
        assert!(text.contains("- Mock Interviews: 5 hours (high priority)"));
        assert!(text.contains("Total Preparation Time: 10"));
        assert!(text.contains("Recommended Timeline: 1 week"));
    }

    #[test]
    fn test_render_analysis_missing_fields() {
        plain();
        let analysis: GoalAnalysis = serde_json::from_str(r#"{"goal_name":""}"#).unwrap();

        let text = render_analysis(&analysis);
        assert!(text.contains("Your Goal"));
        assert!(!text.contains("Preparation Activities"));
        assert!(text.contains("Total Preparation Time: Unknown"));
    }

    #[test]
    fn test_render_analysis_sparse_activity() {
        plain();
        let analysis: GoalAnalysis = serde_json::from_str(
            r#"{"goal_name":"Marathon","preparation_activities":[{"name":"Long runs"},{"estimated_hours":2}]}"#,
        )
        .unwrap();

        let text = render_analysis(&analysis);
        assert!(text.contains("- Long runs\n"));
        assert!(text.contains("- Unnamed activity: 2 hours\n"));
        assert!(!text.contains("priority"));
    }

    #[test]
    fn test_render_schedule() {
        plain();
        let result: ScheduleResult = serde_json::from_str(
            r#"{"daily_schedules":[
                {"date":"2024-01-01","activities":[{"activity_name":"Mock Interviews","start_time":"09:00","end_time":"10:00","notes":"Behavioral"}]},
                {"date":"Day 2","activities":[]}
            ],"total_scheduled_hours":1,"schedule_notes":"Rest on day 2"}"#,
        )
        .unwrap();

        let text = render_schedule(&result.daily_schedules);
        assert!(text.contains("2024-01-01 (Monday)"));
        assert!(text.contains("09:00 - 10:00: Mock Interviews"));
        assert!(text.contains("Behavioral"));
        assert!(text.contains("Day 2"));
        assert!(text.contains("No activities scheduled for this day."));

        let summary = render_schedule_summary(&result);
        assert!(summary.contains("Total scheduled hours: 1"));
        assert!(summary.contains("Rest on day 2"));

        let bare: ScheduleResult = serde_json::from_str(r#"{"daily_schedules":[]}"#).unwrap();
        assert!(render_schedule_summary(&bare).contains("Total scheduled hours: Unknown"));
    }
}
