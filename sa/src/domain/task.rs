//! Task domain type
//!
//! A Task is a flexible-time actionable item, optionally tied to a Meeting
//! through `related_event`. Preparation tasks require a course code.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::field::FieldName;
use super::timeofday::{self, TimeOfDay};

/// Priority level for tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    #[serde(alias = "normal")]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "normal" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Task category
///
/// Open set on the wire; only `preparation` carries semantics (it gates the
/// course-code requirement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Homework,
    Preparation,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Homework => "homework",
            Self::Preparation => "preparation",
            Self::Other(s) => s,
        }
    }

    fn from_wire(s: &str) -> Self {
        match s {
            "homework" => Self::Homework,
            "preparation" => Self::Preparation,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

/// A flexible-time actionable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique identifier; assigned by `ensure_ids` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable description, e.g. "Study for exam"
    pub description: String,

    /// Weekday name, e.g. "Tuesday"
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub day: Option<String>,

    /// Canonical time of day, or an ambiguity marker
    #[serde(default, deserialize_with = "timeofday::deserialize_opt")]
    pub time: Option<TimeOfDay>,

    /// Length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,

    /// Priority for the optimizer
    #[serde(default)]
    pub priority: Priority,

    /// Task category, e.g. "homework" or "preparation"
    #[serde(default)]
    pub category: Option<Category>,

    /// Whether the task must happen at its stated time
    #[serde(default)]
    pub is_fixed_time: bool,

    /// Where the task happens
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::empty_str_as_none")]
    pub location: Option<String>,

    /// Course this task belongs to; required for preparation tasks
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub course_code: Option<String>,

    /// Free-text reference to a Meeting's description (not an id)
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub related_event: Option<String>,

    /// Fields currently unresolved, kept eagerly consistent with the values
    #[serde(default)]
    pub missing_info: BTreeSet<FieldName>,
}

impl Task {
    /// Whether this is a preparation task
    pub fn is_preparation(&self) -> bool {
        self.category == Some(Category::Preparation)
    }

    /// Whether this task still needs a course code
    pub fn needs_course_code(&self) -> bool {
        self.course_code.is_none() && self.is_preparation()
    }

    /// Recompute `missing_info` from the current field values
    ///
    /// Tracked fields: `day`, `time`, `duration_minutes`, and `course_code`
    /// for preparation tasks.
    pub fn refresh_missing_info(&mut self) {
        self.missing_info.clear();
        if self.day.is_none() {
            self.missing_info.insert(FieldName::Day);
        }
        if self.time.is_none() {
            self.missing_info.insert(FieldName::Time);
        }
        if self.duration_minutes.is_none() {
            self.missing_info.insert(FieldName::DurationMinutes);
        }
        if self.needs_course_code() {
            self.missing_info.insert(FieldName::CourseCode);
        }
    }
}
