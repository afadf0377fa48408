//! Schedule intake
//!
//! Post-processing for freshly parsed schedules: identifier assignment,
//! missing-info bookkeeping, and the first question pass. The interactive
//! session that drives a schedule to convergence lives in [`session`].

mod session;

pub use session::ClarifySession;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clarify::find_questions;
use crate::domain::{Question, Schedule, ensure_ids};

/// Where a freshly ingested schedule stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    /// Every required field is resolved
    Complete,
    /// Clarifying questions must be answered first
    QuestionsNeeded,
}

impl std::fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::QuestionsNeeded => write!(f, "questions_needed"),
        }
    }
}

/// Result of ingesting one parsed schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeOutcome {
    pub status: IntakeStatus,
    pub schedule: Schedule,
    pub questions: Vec<Question>,
}

/// Ingest a raw parsed schedule
///
/// Ensures ids, enforces the missing-info invariant against whatever the
/// parser produced, and computes the initial question list. Time fields are
/// already canonical: normalization happens structurally when the schedule
/// is deserialized.
pub fn ingest(mut schedule: Schedule) -> IntakeOutcome {
    ensure_ids(&mut schedule);
    schedule.refresh_missing_info();
    let questions = find_questions(&schedule);
    let status = if questions.is_empty() {
        IntakeStatus::Complete
    } else {
        IntakeStatus::QuestionsNeeded
    };
    debug!(
        meetings = schedule.meetings.len(),
        tasks = schedule.tasks.len(),
        questions = questions.len(),
        %status,
        "ingest: processed parsed schedule"
    );
    IntakeOutcome {
        status,
        schedule,
        questions,
    }
}
