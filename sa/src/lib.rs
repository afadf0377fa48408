//! SchedAssist - missing-information resolution for LLM-parsed schedules
//!
//! A scheduling assistant takes free-text descriptions of a student's
//! commitments, delegates parsing to an LLM, and gets back a schedule that
//! may have holes: meetings without times, exams without course codes. This
//! crate is the engine that closes those holes: it determines exactly what is
//! missing, generates a minimal set of clarifying questions, applies answers
//! back with cross-item propagation, and tracks convergence to a schedule
//! that is ready for optimization.
//!
//! # Core flow
//!
//! 1. An external parser produces a raw [`domain::Schedule`]
//! 2. [`domain::ensure_ids`] gives every item a stable identifier
//! 3. Time fields normalize to 24-hour form (or an explicit ambiguity
//!    marker) at the serde boundary via [`domain::TimeOfDay`]
//! 4. [`clarify::find_questions`] computes the ordered question list
//! 5. Answers loop through [`clarify::apply_answer`] until no questions
//!    remain; the schedule is then ready for the external optimizer
//!
//! # Modules
//!
//! - [`domain`] - schedule data model, time normalization, id assignment
//! - [`clarify`] - missing-info analyzer and answer applicator
//! - [`intake`] - parse-output ingestion and the interactive clarify session
//! - [`llm`] - schedule parser trait and Anthropic implementation
//! - [`state`] - actor that owns the schedule store and serializes mutation
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod clarify;
pub mod config;
pub mod domain;
pub mod intake;
pub mod llm;
pub mod state;

// Re-export commonly used types
pub use clarify::{AnswerOutcome, AnswerRequest, ClarifyError, apply_answer, find_questions};
pub use config::{Config, LlmConfig, SessionConfig};
pub use domain::{
    Category, FieldName, Meeting, MeetingKind, Priority, Question, QuestionKind, Schedule, Task, TargetType,
    TimeOfDay, ensure_ids,
};
pub use intake::{ClarifySession, IntakeOutcome, IntakeStatus, ingest};
pub use llm::{AnthropicParser, LlmError, ScheduleParser, create_parser};
pub use state::{AnswerReply, SessionManager, StateError};
