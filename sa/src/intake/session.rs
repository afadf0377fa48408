//! ClarifySession - one-question-at-a-time conversation to converge a schedule
//!
//! Drives the full loop: parse free text via the LLM boundary, ingest the
//! result, then ask the user each clarifying question in turn and fold the
//! answers back in until the schedule is ready for optimization.

use std::io::{self, BufRead, Write as IoWrite};
use std::sync::Arc;

use eyre::{Context, Result, bail};
use tracing::{debug, info, warn};

use schedstore::Slot;

use crate::clarify::AnswerRequest;
use crate::config::SessionConfig;
use crate::domain::Schedule;
use crate::llm::ScheduleParser;
use crate::state::{SessionManager, StateError};

use super::IntakeStatus;

/// Interactive clarify session over stdin/stdout
pub struct ClarifySession {
    parser: Arc<dyn ScheduleParser>,
    manager: SessionManager,
    config: SessionConfig,
}

impl ClarifySession {
    pub fn new(parser: Arc<dyn ScheduleParser>, manager: SessionManager, config: SessionConfig) -> Self {
        Self {
            parser,
            manager,
            config,
        }
    }

    /// Parse the text and resolve every clarifying question interactively
    ///
    /// Returns the converged schedule. If the user stops answering (EOF) or
    /// the round limit is hit, the working schedule is returned as-is with a
    /// warning; it may still have unresolved fields.
    pub async fn run_interactive(&self, text: &str) -> Result<Schedule> {
        info!("Starting clarify session");

        let raw = self
            .parser
            .parse_schedule(text)
            .await
            .context("schedule parsing failed")?;

        let outcome = self
            .manager
            .ingest(raw)
            .await
            .map_err(|e| eyre::eyre!("ingest failed: {e}"))?;

        if outcome.status == IntakeStatus::Complete {
            info!("Parsed schedule is already complete");
            return Ok(outcome.schedule);
        }

        println!("I need a few details to finish your schedule.");

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut questions = outcome.questions;

        for round in 0..self.config.max_rounds {
            let Some(question) = questions.first() else {
                break;
            };
            debug!(round, remaining = questions.len(), "session: asking question");

            println!("\n{}", question.question);
            print!("> ");
            stdout.flush().context("Failed to flush stdout")?;

            let mut line = String::new();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .context("Failed to read from stdin")?;
            if read == 0 {
                warn!("stdin closed before the schedule converged");
                return self.working_schedule().await;
            }
            let answer = line.trim();
            if answer.is_empty() {
                println!("(skipped - I'll ask again later)");
                questions.rotate_left(1);
                continue;
            }

            let request = AnswerRequest::for_question(question, answer);
            match self.manager.answer(request).await {
                Ok(reply) => {
                    if reply.ready_for_optimization {
                        println!("\nAll set - your schedule is complete.");
                        return Ok(reply.schedule);
                    }
                    questions = reply.questions;
                }
                Err(StateError::InvalidInput(reason)) => {
                    // Recoverable: re-prompt with the same question
                    println!("Sorry, I couldn't use that answer: {}", reason);
                }
                Err(e) => bail!("answer failed: {e}"),
            }
        }

        warn!(max_rounds = self.config.max_rounds, "round limit reached before convergence");
        self.working_schedule().await
    }

    async fn working_schedule(&self) -> Result<Schedule> {
        self.manager
            .get_schedule(Slot::Working)
            .await
            .map_err(|e| eyre::eyre!("loading working schedule failed: {e}"))
    }
}
