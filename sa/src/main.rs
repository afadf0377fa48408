//! SchedAssist CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result, bail};
use tracing::info;

use schedassist::cli::{Cli, Command};
use schedassist::clarify::{AnswerRequest, apply_answer};
use schedassist::config::Config;
use schedassist::domain::Schedule;
use schedassist::intake::{self, ClarifySession};
use schedassist::llm::create_parser;
use schedassist::state::SessionManager;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN, to keep the
    // interactive prompt clean)
    let level = cli_log_level.or(config_log_level).unwrap_or("WARN");
    let filter = tracing_subscriber::EnvFilter::try_new(level.to_lowercase())
        .context(format!("Invalid log level: {}", level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref())?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref())?;

    match cli.command {
        Command::Parse { text, file } => cmd_parse(&config, text, file).await,
        Command::Check { schedule } => cmd_check(&schedule),
        Command::Answer {
            schedule,
            item_id,
            kind,
            answer,
            write,
        } => cmd_answer(&schedule, item_id, kind, answer, write),
    }
}

async fn cmd_parse(config: &Config, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match (text, file) {
        (Some(text), None) => text,
        (None, Some(path)) => {
            fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?
        }
        (Some(_), Some(_)) => bail!("Provide either TEXT or --file, not both"),
        (None, None) => bail!("Provide the schedule text or --file"),
    };

    config.validate()?;
    let parser = create_parser(&config.llm)?;
    let manager = SessionManager::spawn();
    let session = ClarifySession::new(parser, manager.clone(), config.session.clone());

    let schedule = session.run_interactive(&text).await?;
    manager.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

fn cmd_check(path: &PathBuf) -> Result<()> {
    let schedule = read_schedule(path)?;
    let outcome = intake::ingest(schedule);
    info!(status = %outcome.status, questions = outcome.questions.len(), "check complete");
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn cmd_answer(path: &PathBuf, item_id: String, kind: String, answer: String, write: bool) -> Result<()> {
    let mut schedule = read_schedule(path)?;

    let request = AnswerRequest {
        item_id: Some(item_id),
        kind: Some(kind),
        answer: Some(answer),
        ..Default::default()
    };
    let outcome = apply_answer(&mut schedule, &request)?;

    if write {
        fs::write(path, serde_json::to_string_pretty(&schedule)?)
            .context(format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "updated schedule written");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "schedule": schedule,
            "ready_for_optimization": outcome.ready_for_optimization,
            "has_more_questions": outcome.has_more_questions,
            "questions": outcome.questions,
        }))?
    );
    Ok(())
}

fn read_schedule(path: &PathBuf) -> Result<Schedule> {
    let content = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).context(format!("{} is not a valid schedule", path.display()))
}
