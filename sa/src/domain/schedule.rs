//! Schedule aggregate root

use serde::{Deserialize, Serialize};

use super::meeting::Meeting;
use super::task::Task;

/// The schedule aggregate: ordered meetings, ordered tasks, known course codes
///
/// Created empty, populated by the external parser, mutated in place by the
/// answer applicator, replaced wholesale by store and reset operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub meetings: Vec<Meeting>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub course_codes: Vec<String>,
}

impl Schedule {
    /// Whether the schedule has no items at all
    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty() && self.tasks.is_empty()
    }

    /// Recompute every item's `missing_info` set from its current values
    ///
    /// Parser output may carry stale or absent `missing_info`; this enforces
    /// the invariant that a tracked field is listed exactly when its value is
    /// null.
    pub fn refresh_missing_info(&mut self) {
        for meeting in &mut self.meetings {
            meeting.refresh_missing_info();
        }
        for task in &mut self.tasks {
            task.refresh_missing_info();
        }
    }

    /// Record a course code in the known set, preserving insertion order
    pub fn add_course_code(&mut self, code: &str) {
        if !self.course_codes.iter().any(|c| c == code) {
            self.course_codes.push(code.to_string());
        }
    }

    /// Whether any meeting or task carries the given id
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.meetings.iter().any(|m| m.id.as_deref() == Some(item_id))
            || self.tasks.iter().any(|t| t.id.as_deref() == Some(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldName;

    /// Sample shaped like real parser output
    fn sample_with_missing_info() -> Schedule {
        serde_json::from_str(
            r#"{
                "meetings": [
                    {
                        "id": "meeting-1",
                        "description": "CS101 Exam",
                        "day": "Monday",
                        "time": null,
                        "duration_minutes": null,
                        "type": "exam",
                        "location": "Room 101",
                        "course_code": "CS101",
                        "missing_info": ["time", "duration_minutes"]
                    }
                ],
                "tasks": [
                    {
                        "id": "task-1",
                        "description": "Study for exam",
                        "day": null,
                        "time": null,
                        "duration_minutes": null,
                        "priority": "high",
                        "category": "preparation",
                        "is_fixed_time": false,
                        "course_code": "CS101",
                        "related_event": "CS101 Exam",
                        "missing_info": ["day", "time", "duration_minutes"]
                    }
                ],
                "course_codes": ["CS101"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_is_well_formed_empty() {
        let schedule = Schedule::default();
        assert!(schedule.is_empty());
        assert!(schedule.meetings.is_empty());
        assert!(schedule.tasks.is_empty());
        assert!(schedule.course_codes.is_empty());
    }

    #[test]
    fn test_sample_round_trips() {
        let schedule = sample_with_missing_info();
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, back);
    }

    #[test]
    fn test_refresh_missing_info_enforces_invariant() {
        let mut schedule = sample_with_missing_info();
        // Wipe the parser-provided sets and recompute
        schedule.meetings[0].missing_info.clear();
        schedule.tasks[0].missing_info.clear();
        schedule.refresh_missing_info();

        assert!(schedule.meetings[0].missing_info.contains(&FieldName::Time));
        assert!(schedule.meetings[0].missing_info.contains(&FieldName::DurationMinutes));
        // Course code present, so not missing despite exam type
        assert!(!schedule.meetings[0].missing_info.contains(&FieldName::CourseCode));

        assert!(schedule.tasks[0].missing_info.contains(&FieldName::Day));
        assert!(!schedule.tasks[0].missing_info.contains(&FieldName::CourseCode));
    }

    #[test]
    fn test_add_course_code_dedupes() {
        let mut schedule = Schedule::default();
        schedule.add_course_code("CS101");
        schedule.add_course_code("CS304");
        schedule.add_course_code("CS101");
        assert_eq!(schedule.course_codes, vec!["CS101", "CS304"]);
    }

    #[test]
    fn test_contains_item() {
        let schedule = sample_with_missing_info();
        assert!(schedule.contains_item("meeting-1"));
        assert!(schedule.contains_item("task-1"));
        assert!(!schedule.contains_item("meeting-9"));
    }
}
