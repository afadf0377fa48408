//! Missing-information resolution
//!
//! Two halves: the analyzer scans a schedule and produces the minimal,
//! de-duplicated list of clarifying questions; the applicator folds one user
//! answer back into the schedule, propagates derived fields to related items,
//! and reports whether the schedule has converged.

mod analyzer;
mod answer;

pub use analyzer::find_questions;
pub use answer::{AnswerOutcome, AnswerRequest, ClarifyError, apply_answer};
