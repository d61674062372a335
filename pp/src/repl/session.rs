//! REPL session management

use std::ops::RangeInclusive;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use super::ReplCommand;
use crate::agent::{AgentError, SchedulingAgent};
use crate::domain::{ProductiveTime, UserPreferences, parse_commitments};
use crate::render::{render_analysis, render_schedule, render_schedule_summary};

const NOT_INITIALIZED: &str = "Agent not initialized. Please check your API key.";

/// Session lengths the preference prompt accepts, in minutes
const SESSION_LENGTH_MINUTES: RangeInclusive<u32> = 30..=120;

/// What the main loop does after a command
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SlashResult {
    Continue,
    Quit,
    /// `/prefs` without a file; the loop asks for each field
    PromptPreferences,
}

/// Interactive REPL session
///
/// `agent` is `None` when no credential was available at startup; every step
/// that needs the model then reports that instead of failing.
pub struct ReplSession {
    agent: Option<SchedulingAgent>,
    default_days: u32,
    max_days: u32,
    goal_analyzed: bool,
    preferences_set: bool,
    schedule_generated: bool,
    last_goal: Option<String>,
}

impl ReplSession {
    pub fn new(agent: Option<SchedulingAgent>, default_days: u32, max_days: u32) -> Self {
        Self {
            agent,
            default_days,
            max_days,
            goal_analyzed: false,
            preferences_set: false,
            schedule_generated: false,
            last_goal: None,
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match self.execute(ReplCommand::parse(input)).await {
                        SlashResult::Continue => continue,
                        SlashResult::Quit => break,
                        SlashResult::PromptPreferences => {
                            if let Some(prefs) = prompt_preferences(&mut rl)? {
                                self.save_preferences(prefs);
                            } else {
                                println!("{}", "Preferences unchanged.".dimmed());
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Preparation Planner".bright_cyan().bold());
        println!("Describe what you are preparing for, then set preferences and build a schedule.");
        if self.agent.is_none() {
            println!("{} {}", "!".red(), NOT_INITIALIZED);
        }
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Execute one parsed command
    pub(crate) async fn execute(&mut self, command: ReplCommand) -> SlashResult {
        debug!(?command, "execute: called");
        match command {
            ReplCommand::Analyze(description) => self.analyze(&description).await,
            ReplCommand::Prefs(Some(path)) => match UserPreferences::from_file(&path) {
                Ok(prefs) => self.save_preferences(prefs),
                Err(e) => println!("{} {:#}", "✗".red(), e),
            },
            ReplCommand::Prefs(None) => {
                if self.agent.is_none() {
                    println!("{} {}", "✗".red(), NOT_INITIALIZED);
                } else {
                    return SlashResult::PromptPreferences;
                }
            }
            ReplCommand::Goals => self.print_goals(),
            ReplCommand::Schedule { goal, days } => self.schedule(goal, days).await,
            ReplCommand::Show => self.show(),
            ReplCommand::Status => self.print_status(),
            ReplCommand::Help => self.print_help(),
            ReplCommand::Quit => return SlashResult::Quit,
            ReplCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        SlashResult::Continue
    }

    async fn analyze(&mut self, description: &str) {
        if description.trim().is_empty() {
            println!("{} Please enter a goal description.", "✗".red());
            return;
        }
        let Some(agent) = self.agent.as_mut() else {
            println!("{} {}", "✗".red(), NOT_INITIALIZED);
            return;
        };

        println!("{}", "Analyzing your goal...".dimmed());
        match agent.analyze_goal(description).await {
            Ok(analysis) => {
                println!("{} Goal analyzed successfully!", "✓".green());
                println!();
                print!("{}", render_analysis(&analysis));
                self.goal_analyzed = true;
                self.last_goal = Some(analysis.goal_name);
            }
            Err(e) => print_agent_error(&e),
        }
    }

    fn save_preferences(&mut self, prefs: UserPreferences) {
        let Some(agent) = self.agent.as_mut() else {
            println!("{} {}", "✗".red(), NOT_INITIALIZED);
            return;
        };
        agent.collect_user_preferences(prefs);
        self.preferences_set = true;
        info!("Preferences saved");
        println!("{} Preferences saved successfully!", "✓".green());
    }

    async fn schedule(&mut self, goal: Option<String>, days: Option<u32>) {
        if !self.goal_analyzed {
            println!("{} Please analyze a goal first.", "!".yellow());
            return;
        }
        if !self.preferences_set {
            println!("{} Please set your preferences first.", "!".yellow());
            return;
        }
        let Some(agent) = self.agent.as_mut() else {
            println!("{} {}", "✗".red(), NOT_INITIALIZED);
            return;
        };
        let Some(goal) = goal.or_else(|| self.last_goal.clone()) else {
            println!("{} No goals analyzed yet.", "✗".red());
            return;
        };
        let days = days.unwrap_or(self.default_days);
        if days > self.max_days {
            println!("{} Schedule at most {} days.", "✗".red(), self.max_days);
            return;
        }

        println!("{}", format!("Generating a {}-day schedule for {}...", days, goal).dimmed());
        match agent.generate_schedule(&goal, days).await {
            Ok(result) => {
                println!("{} Schedule generated successfully!", "✓".green());
                print!("{}", render_schedule_summary(&result));
                println!();
                print!("{}", render_schedule(&result.daily_schedules));
                self.schedule_generated = true;
            }
            Err(e) => print_agent_error(&e),
        }
    }

    fn show(&self) {
        if !self.schedule_generated {
            println!("{} No schedule has been generated yet.", "!".yellow());
            return;
        }
        match self.agent.as_ref().map(SchedulingAgent::schedule) {
            Some(days) if !days.is_empty() => print!("{}", render_schedule(days)),
            _ => println!("{} No schedule available.", "✗".red()),
        }
    }

    fn print_goals(&self) {
        let goals = self.agent.as_ref().map(SchedulingAgent::goals);
        match goals {
            Some(goals) if !goals.is_empty() => {
                println!("{}", "Analyzed Goals:".bright_cyan());
                for (name, analysis) in goals {
                    println!(
                        "  {} ({} activities, {})",
                        name.bold(),
                        analysis.activities().len(),
                        match analysis.total_preparation_time.as_deref() {
                            Some(total) if !total.trim().is_empty() => format!("{} total", total),
                            _ => "unknown total".to_string(),
                        }
                    );
                }
            }
            _ => println!("{}", "No goals analyzed yet.".dimmed()),
        }
    }

    fn print_status(&self) {
        let mark = |done: bool| if done { "✓".green() } else { "·".dimmed() };
        println!();
        println!("{}", "Progress:".bright_cyan());
        println!("  {} Agent initialized", mark(self.agent.is_some()));
        println!("  {} Goal analyzed", mark(self.goal_analyzed));
        println!("  {} Preferences set", mark(self.preferences_set));
        println!("  {} Schedule generated", mark(self.schedule_generated));
        if let Some(goal) = &self.last_goal {
            println!("  Current goal: {}", goal.bold());
        }
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:22} Analyze a goal (bare text works too)", "/analyze <text>".yellow());
        println!("  {:22} Set preferences from a file, or answer prompts", "/prefs [FILE]".yellow());
        println!("  {:22} List analyzed goals", "/goals".yellow());
        println!(
            "  {:22} Build a schedule (default {} days)",
            "/schedule [goal] [days]".yellow(),
            self.default_days
        );
        println!("  {:22} Show the last schedule", "/show".yellow());
        println!("  {:22} Show progress", "/status".yellow());
        println!("  {:22} Show this help", "/help".yellow());
        println!("  {:22} Exit the REPL", "/quit".yellow());
        println!();
    }
}

fn print_agent_error(error: &AgentError) {
    println!("{} {}", "✗".red(), error);
    if let Some(raw) = error.raw_text() {
        println!("{}", raw.dimmed());
    }
}

/// Read one answer; `None` when the user aborts with Ctrl+C or Ctrl+D
fn ask(rl: &mut DefaultEditor, prompt: &str, default: &str) -> Result<Option<String>> {
    let prompt = if default.is_empty() {
        format!("{}: ", prompt)
    } else {
        format!("{} [{}]: ", prompt, default)
    };
    match rl.readline(&prompt) {
        Ok(line) => {
            let line = line.trim();
            Ok(Some(if line.is_empty() { default } else { line }.to_string()))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}

/// Ask for each preference field in turn
fn prompt_preferences(rl: &mut DefaultEditor) -> Result<Option<UserPreferences>> {
    let defaults = UserPreferences::default();

    let Some(name) = ask(rl, "Your name", "")? else {
        return Ok(None);
    };
    let Some(wake_time) = ask(rl, "Wake time", &defaults.time_constraints.wake_time)? else {
        return Ok(None);
    };
    let Some(sleep_time) = ask(rl, "Sleep time", &defaults.time_constraints.sleep_time)? else {
        return Ok(None);
    };

    let choices = ProductiveTime::ALL.map(|t| t.to_string()).join("/");
    let productive_time = loop {
        let Some(answer) = ask(
            rl,
            &format!("Most productive time ({})", choices),
            &defaults.productive_time.to_string(),
        )?
        else {
            return Ok(None);
        };
        match answer.parse::<ProductiveTime>() {
            Ok(time) => break time,
            Err(e) => println!("{} {}", "!".yellow(), e),
        }
    };

    let session_length_minutes = loop {
        let Some(answer) = ask(
            rl,
            &format!(
                "Preferred session length in minutes ({}-{})",
                SESSION_LENGTH_MINUTES.start(),
                SESSION_LENGTH_MINUTES.end()
            ),
            &defaults.session_length_minutes.to_string(),
        )?
        else {
            return Ok(None);
        };
        match parse_session_length(&answer) {
            Some(n) => break n,
            None => println!(
                "{} Enter a number between {} and {}.",
                "!".yellow(),
                SESSION_LENGTH_MINUTES.start(),
                SESSION_LENGTH_MINUTES.end()
            ),
        }
    };

    println!("Fixed commitments, one per line (e.g. Work 9 AM - 5 PM Monday-Friday); empty line to finish:");
    let mut lines = Vec::new();
    loop {
        match rl.readline("  ") {
            Ok(line) if line.trim().is_empty() => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    let mut prefs = UserPreferences {
        name,
        productive_time,
        session_length_minutes,
        commitments: parse_commitments(&lines.join("\n")),
        ..defaults
    };
    prefs.time_constraints.wake_time = wake_time;
    prefs.time_constraints.sleep_time = sleep_time;
    Ok(Some(prefs))
}

/// A session length in minutes, if it is a whole number in range
fn parse_session_length(answer: &str) -> Option<u32> {
    answer
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| SESSION_LENGTH_MINUTES.contains(n))
}
