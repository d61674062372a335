//! Domain types for goals, preferences and schedules

mod goal;
mod lenient;
mod preferences;
mod priority;
mod schedule;

pub use goal::{GoalAnalysis, PreparationActivity};
pub use preferences::{ProductiveTime, TimeConstraints, UserPreferences, parse_commitments};
pub use priority::Priority;
pub use schedule::{DaySchedule, ScheduleResult, ScheduledActivity};
