//! Names of schedule-item fields tracked for missing information

use serde::{Deserialize, Serialize};

/// A schedule-item field that can be unresolved
///
/// The variant order defines the iteration order of a `missing_info` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    CourseCode,
    Day,
    DurationMinutes,
    Location,
    Time,
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CourseCode => write!(f, "course_code"),
            Self::Day => write!(f, "day"),
            Self::DurationMinutes => write!(f, "duration_minutes"),
            Self::Location => write!(f, "location"),
            Self::Time => write!(f, "time"),
        }
    }
}

impl std::str::FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course_code" => Ok(Self::CourseCode),
            "day" => Ok(Self::Day),
            "duration_minutes" => Ok(Self::DurationMinutes),
            "location" => Ok(Self::Location),
            "time" => Ok(Self::Time),
            _ => Err(format!("Unknown field name: {}", s)),
        }
    }
}
