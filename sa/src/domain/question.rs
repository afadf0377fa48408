//! Clarifying question type
//!
//! Questions are ephemeral: derived from a schedule by the analyzer, handed
//! to the caller for display, and never persisted.

use serde::{Deserialize, Serialize};

use super::field::FieldName;

/// What a question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Time,
    Duration,
    CourseCode,
}

impl QuestionKind {
    /// The schedule field this kind of question fills
    pub fn field(&self) -> FieldName {
        match self {
            Self::Time => FieldName::Time,
            Self::Duration => FieldName::DurationMinutes,
            Self::CourseCode => FieldName::CourseCode,
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Duration => write!(f, "duration"),
            Self::CourseCode => write!(f, "course_code"),
        }
    }
}

impl std::str::FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Self::Time),
            "duration" => Ok(Self::Duration),
            "course_code" => Ok(Self::CourseCode),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

/// Which kind of schedule item a question targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Meeting,
    Task,
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meeting => write!(f, "meeting"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// A single clarifying question about one unresolved field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// What the question asks for
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Human-readable question text
    pub question: String,

    /// The schedule field the answer fills
    pub field: FieldName,

    /// Description of the referenced item, for display and task-suppression
    /// matching
    pub target: String,

    /// Whether the target is a meeting or a task
    pub target_type: TargetType,

    /// The target item's id
    pub target_id: String,
}
