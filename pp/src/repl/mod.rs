//! Interactive REPL for prepplanner
//!
//! Walks a user through analyze → preferences → schedule with slash
//! commands, gating each step on the ones before it.

mod command;
mod session;

pub use command::ReplCommand;
pub use session::ReplSession;

use eyre::Result;
use tracing::warn;

use crate::agent::SchedulingAgent;
use crate::config::Config;

/// Run the interactive REPL
///
/// This is the main entry point for `pp repl`. A missing credential does not
/// stop the session; it runs uninitialized and reports that on each request.
pub async fn run_interactive(config: &Config) -> Result<()> {
    let agent = match SchedulingAgent::from_config(config) {
        Ok(agent) => Some(agent),
        Err(e) => {
            warn!(error = %e, "Agent not initialized");
            None
        }
    };

    let mut session = ReplSession::new(agent, config.schedule.default_days, config.schedule.max_days);
    session.run().await
}
