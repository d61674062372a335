//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System instruction for goal analysis
pub const ANALYZE_SYSTEM: &str = include_str!("../../prompts/analyze-system.pmt");

/// User prompt for goal analysis
pub const ANALYZE: &str = include_str!("../../prompts/analyze.pmt");

/// System instruction for schedule generation
pub const SCHEDULE_SYSTEM: &str = include_str!("../../prompts/schedule-system.pmt");

/// User prompt for schedule generation
pub const SCHEDULE: &str = include_str!("../../prompts/schedule.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "analyze-system" => Some(ANALYZE_SYSTEM),
        "analyze" => Some(ANALYZE),
        "schedule-system" => Some(SCHEDULE_SYSTEM),
        "schedule" => Some(SCHEDULE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
