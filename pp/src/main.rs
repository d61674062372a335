//! pp - preparation planner
//!
//! CLI entry point: analyze a goal, build a schedule, or run the interactive
//! session.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use tracing::info;

use prepplanner::agent::{AgentError, SchedulingAgent};
use prepplanner::cli::{Cli, Command, OutputFormat, get_log_path};
use prepplanner::config::Config;
use prepplanner::domain::UserPreferences;
use prepplanner::render::{render_analysis, render_schedule, render_schedule_summary};
use prepplanner::repl;

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to the log file only; stdout belongs to the rendered output
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before logging so RUST_LOG from .env takes effect; a missing .env is normal
    dotenvy::dotenv().ok();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        "prepplanner loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Analyze { description, format }) => cmd_analyze(&config, &description, format).await,
        Some(Command::Plan {
            description,
            prefs,
            days,
            format,
        }) => cmd_plan(&config, &description, prefs, days, format).await,
        Some(Command::PrefsTemplate) => cmd_prefs_template(),
        Some(Command::Repl) => repl::run_interactive(&config).await,
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn require_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(eyre::eyre!("Please enter a goal description."));
    }
    Ok(())
}

fn build_agent(config: &Config) -> Result<SchedulingAgent> {
    SchedulingAgent::from_config(config).map_err(|e| eyre::eyre!("Agent not initialized: {}", e))
}

/// Attach the raw model text to parse failures so the user sees what came back
fn agent_report(error: AgentError) -> eyre::Report {
    match error.raw_text() {
        Some(raw) => eyre::eyre!("{}\n{}", error, raw),
        None => eyre::Report::new(error),
    }
}

async fn cmd_analyze(config: &Config, description: &str, format: OutputFormat) -> Result<()> {
    require_description(description)?;
    let mut agent = build_agent(config)?;

    let analysis = agent.analyze_goal(description).await.map_err(agent_report)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print!("{}", render_analysis(&analysis)),
    }
    Ok(())
}

async fn cmd_plan(
    config: &Config,
    description: &str,
    prefs: Option<PathBuf>,
    days: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    require_description(description)?;

    let days = days.unwrap_or(config.schedule.default_days);
    if days == 0 || days > config.schedule.max_days {
        return Err(eyre::eyre!(
            "Days must be between 1 and {}, got {}",
            config.schedule.max_days,
            days
        ));
    }

    let preferences = match &prefs {
        Some(path) => UserPreferences::from_file(path)?,
        None => UserPreferences::default(),
    };

    let mut agent = build_agent(config)?;

    let analysis = agent.analyze_goal(description).await.map_err(agent_report)?;
    agent.collect_user_preferences(preferences.clone());
    let result = agent
        .generate_schedule(&analysis.goal_name, days)
        .await
        .map_err(agent_report)?;

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "analysis": analysis,
                "preferences": preferences,
                "schedule": result,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print!("{}", render_analysis(&analysis));
            println!();
            print!("{}", render_schedule_summary(&result));
            println!();
            print!("{}", render_schedule(&result.daily_schedules));
        }
    }
    Ok(())
}

fn cmd_prefs_template() -> Result<()> {
    print!("{}", UserPreferences::template()?);
    Ok(())
}
