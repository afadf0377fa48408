//! Meeting domain type
//!
//! A Meeting is a fixed-time calendar occurrence: a lecture, an exam, a
//! project meeting. Exams and presentations additionally require a course
//! code before the schedule can be optimized.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::field::FieldName;
use super::timeofday::{self, TimeOfDay};

/// Kind of meeting
///
/// Open set on the wire: unknown kinds round-trip via [`MeetingKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeetingKind {
    #[default]
    Regular,
    Exam,
    Presentation,
    Other(String),
}

impl MeetingKind {
    /// Whether this kind of meeting requires a course code
    pub fn requires_course_code(&self) -> bool {
        matches!(self, Self::Exam | Self::Presentation)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "regular",
            Self::Exam => "exam",
            Self::Presentation => "presentation",
            Self::Other(s) => s,
        }
    }

    fn from_wire(s: &str) -> Self {
        match s {
            "regular" => Self::Regular,
            "exam" => Self::Exam,
            "presentation" => Self::Presentation,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for MeetingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MeetingKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl Serialize for MeetingKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MeetingKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

/// A fixed-time calendar occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// Stable unique identifier; assigned by `ensure_ids` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable description, e.g. "CS101 Lecture"
    pub description: String,

    /// Weekday name, e.g. "Monday"
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub day: Option<String>,

    /// Canonical time of day, or an ambiguity marker
    #[serde(default, deserialize_with = "timeofday::deserialize_opt")]
    pub time: Option<TimeOfDay>,

    /// Length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,

    /// Kind of meeting
    #[serde(default, rename = "type")]
    pub kind: MeetingKind,

    /// Where the meeting happens
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub location: Option<String>,

    /// Course this meeting belongs to; required for exams and presentations
    #[serde(default, deserialize_with = "super::empty_str_as_none")]
    pub course_code: Option<String>,

    /// Fields currently unresolved, kept eagerly consistent with the values
    #[serde(default)]
    pub missing_info: BTreeSet<FieldName>,
}

impl Meeting {
    /// Whether this meeting still needs a course code
    pub fn needs_course_code(&self) -> bool {
        self.course_code.is_none() && self.kind.requires_course_code()
    }

    /// Recompute `missing_info` from the current field values
    ///
    /// Tracked fields: `day`, `time`, `duration_minutes`, and `course_code`
    /// when the meeting kind requires one. An ambiguous time counts as
    /// present - the marker itself is surfaced to the user.
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
