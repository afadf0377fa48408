//! Session manager messages
//!
//! Commands and responses for the actor pattern.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

use schedstore::Slot;

use crate::clarify::{AnswerRequest, ClarifyError};
use crate::domain::{Question, Schedule};
use crate::intake::IntakeOutcome;

/// Errors from session state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session channel closed")]
    Channel,
}

impl From<ClarifyError> for StateError {
    fn from(err: ClarifyError) -> Self {
        match err {
            ClarifyError::NotFound(id) => Self::NotFound(format!("no meeting or task with id '{}'", id)),
            ClarifyError::InvalidInput(reason) => Self::InvalidInput(reason),
        }
    }
}

/// Response from session state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Result of applying one answer through the manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReply {
    /// Updated schedule, already persisted to the working instance
    pub schedule: Schedule,

    pub ready_for_optimization: bool,

    pub has_more_questions: bool,

    /// Recomputed question list
    pub questions: Vec<Question>,
}

/// Commands sent to the SessionManager actor
#[derive(Debug)]
pub enum StateCommand {
    /// Ingest a freshly parsed schedule and store it
    Ingest {
        schedule: Schedule,
        reply: oneshot::Sender<StateResponse<IntakeOutcome>>,
    },

    /// Current question list for the working schedule
    Questions {
        reply: oneshot::Sender<StateResponse<Vec<Question>>>,
    },

    /// Apply one answer to the working schedule
    Answer {
        request: AnswerRequest,
        reply: oneshot::Sender<StateResponse<AnswerReply>>,
    },

    /// Load the selected schedule instance
    GetSchedule {
        slot: Slot,
        reply: oneshot::Sender<StateResponse<Schedule>>,
    },

    /// Clear both schedule instances
    Reset {
        reply: oneshot::Sender<StateResponse<()>>,
    },

    /// Stop the actor
    Shutdown,
}
