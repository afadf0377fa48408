//! Answer applicator
//!
//! Folds one user-supplied answer into the schedule: stores the value (times
//! re-normalized, durations coerced to minutes), maintains the item's
//! missing-info set, propagates a meeting's course code to its dependent
//! preparation tasks, and recomputes the remaining question list.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{FieldName, Question, QuestionKind, Schedule, TimeOfDay};

use super::analyzer::find_questions;

/// Client-fault failures from answer application
///
/// Both are local, synchronous, and recoverable: re-prompt the user. No
/// mutation has happened when either is returned.
#[derive(Debug, Error)]
pub enum ClarifyError {
    /// The answer references an item the schedule does not contain
    #[error("No meeting or task with id '{0}'")]
    NotFound(String),

    /// The answer request is malformed
    #[error("Invalid answer request: {0}")]
    InvalidInput(String),
}

/// A single-answer request, as received from the caller
///
/// All fields optional on the wire; validation happens before any mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub item_id: Option<String>,

    /// Question type being answered: `time`, `duration` or `course_code`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub answer: Option<String>,

    /// Field name, for symmetry with the question; informational
    #[serde(default)]
    pub field: Option<String>,

    /// Target description, informational
    #[serde(default)]
    pub target: Option<String>,

    /// Target type, informational
    #[serde(default)]
    pub target_type: Option<String>,
}

impl AnswerRequest {
    /// Build a request answering the given question
    pub fn for_question(question: &Question, answer: impl Into<String>) -> Self {
        Self {
            item_id: Some(question.target_id.clone()),
            kind: Some(question.kind.to_string()),
            answer: Some(answer.into()),
            field: Some(question.field.to_string()),
            target: Some(question.target.clone()),
            target_type: Some(question.target_type.to_string()),
        }
    }
}

/// Result of applying one answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// No questions remain and the schedule has at least one item
    pub ready_for_optimization: bool,

    /// The recomputed question list is non-empty
    pub has_more_questions: bool,

    /// Recomputed question list for the updated schedule
    pub questions: Vec<Question>,
}

/// Validated answer, produced before any mutation
enum ParsedAnswer {
    Time(Option<TimeOfDay>),
    Duration(u32),
    CourseCode(String),
}

fn validate(request: &AnswerRequest) -> Result<(String, ParsedAnswer), ClarifyError> {
    let item_id = request
        .item_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClarifyError::InvalidInput("item_id is required".to_string()))?;

    let kind_text = request
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClarifyError::InvalidInput("type is required".to_string()))?;

    let kind: QuestionKind = kind_text.parse().map_err(ClarifyError::InvalidInput)?;

    let answer = request
        .answer
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClarifyError::InvalidInput("answer is required".to_string()))?;

    let parsed = match kind {
        QuestionKind::Time => ParsedAnswer::Time(TimeOfDay::parse(Some(answer))),
        QuestionKind::Duration => {
            let minutes: u32 = answer
                .parse()
                .map_err(|_| ClarifyError::InvalidInput(format!("duration must be a number of minutes, got '{}'", answer)))?;
            if minutes == 0 {
                return Err(ClarifyError::InvalidInput("duration must be positive".to_string()));
            }
            ParsedAnswer::Duration(minutes)
        }
        QuestionKind::CourseCode => ParsedAnswer::CourseCode(answer.to_string()),
    };

    Ok((item_id.to_string(), parsed))
}

/// Apply one answer to the schedule
///
/// On success the schedule is updated in place and the outcome carries the
/// recomputed question list and convergence flags. On failure the schedule is
/// untouched. Persistence is the caller's job: the working instance should be
/// saved after every answer, and the final instance when
/// `ready_for_optimization` is set.
pub fn apply_answer(schedule: &mut Schedule, request: &AnswerRequest) -> Result<AnswerOutcome, ClarifyError> {
    let (item_id, parsed) = validate(request)?;

    let target = locate(schedule, &item_id).ok_or_else(|| ClarifyError::NotFound(item_id.clone()))?;

    match parsed {
        ParsedAnswer::Time(time) => {
            debug!(%item_id, time = ?time, "apply_answer: setting time");
            // A null-equivalent answer normalizes to absence; the field then
            // stays tracked as missing and the question is asked again
            let (answered, missing) = match target {
                ItemRef::Meeting(i) => {
                    let meeting = &mut schedule.meetings[i];
                    meeting.time = time;
                    (meeting.time.is_some(), &mut meeting.missing_info)
                }
                ItemRef::Task(i) => {
                    let task = &mut schedule.tasks[i];
                    task.time = time;
                    (task.time.is_some(), &mut task.missing_info)
                }
            };
            if answered {
                missing.remove(&FieldName::Time);
            } else {
                missing.insert(FieldName::Time);
            }
        }
        ParsedAnswer::Duration(minutes) => {
            debug!(%item_id, %minutes, "apply_answer: setting duration");
            match target {
                ItemRef::Meeting(i) => {
                    schedule.meetings[i].duration_minutes = Some(minutes);
                    schedule.meetings[i].missing_info.remove(&FieldName::DurationMinutes);
                }
                ItemRef::Task(i) => {
                    schedule.tasks[i].duration_minutes = Some(minutes);
                    schedule.tasks[i].missing_info.remove(&FieldName::DurationMinutes);
                }
            }
        }
        ParsedAnswer::CourseCode(code) => {
            debug!(%item_id, %code, "apply_answer: setting course code");
            match target {
                ItemRef::Meeting(i) => {
                    schedule.meetings[i].course_code = Some(code.clone());
                    schedule.meetings[i].missing_info.remove(&FieldName::CourseCode);
                    propagate_course_code(schedule, i, &code);
                }
                ItemRef::Task(i) => {
                    schedule.tasks[i].course_code = Some(code.clone());
                    schedule.tasks[i].missing_info.remove(&FieldName::CourseCode);
                }
            }
            schedule.add_course_code(&code);
        }
    }

    let questions = find_questions(schedule);
    let has_more_questions = !questions.is_empty();
    let ready_for_optimization = !has_more_questions && !schedule.is_empty();
    if ready_for_optimization {
        info!("apply_answer: schedule is ready for optimization");
    }

    Ok(AnswerOutcome {
        ready_for_optimization,
        has_more_questions,
        questions,
    })
}

enum ItemRef {
    Meeting(usize),
    Task(usize),
}

fn locate(schedule: &Schedule, item_id: &str) -> Option<ItemRef> {
    if let Some(i) = schedule.meetings.iter().position(|m| m.id.as_deref() == Some(item_id)) {
        return Some(ItemRef::Meeting(i));
    }
    schedule
        .tasks
        .iter()
        .position(|t| t.id.as_deref() == Some(item_id))
        .map(ItemRef::Task)
}

/// Copy a meeting's answered course code onto dependent tasks
///
/// Mirrors the analyzer's suppression rule: tasks whose `related_event`
/// matches the meeting's description were never asked, on the promise that
/// this propagation would fill them in.
fn propagate_course_code(schedule: &mut Schedule, meeting_index: usize, code: &str) {
    let description = schedule.meetings[meeting_index].description.clone();
    for task in &mut schedule.tasks {
        if task.related_event.as_deref() == Some(description.as_str()) && task.course_code.is_none() {
            info!(task = %task.description, %code, "propagating course code to related task");
            task.course_code = Some(code.to_string());
            task.missing_info.remove(&FieldName::CourseCode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TargetType;

    fn exam_with_prep_task() -> Schedule {
        let mut schedule: Schedule = serde_json::from_str(
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
                        "course_code": null
                    }
                ],
                "tasks": [
                    {
                        "id": "task-1",
                        "description": "Study for exam",
                        "day": "Sunday",
                        "time": "19:00",
                        "duration_minutes": 120,
                        "category": "preparation",
                        "course_code": null,
                        "related_event": "CS101 Exam"
                    }
                ],
                "course_codes": []
            }"#,
        )
        .unwrap();
        schedule.refresh_missing_info();
        schedule
    }

    fn request(item_id: &str, kind: &str, answer: &str) -> AnswerRequest {
        AnswerRequest {
            item_id: Some(item_id.to_string()),
            kind: Some(kind.to_string()),
            answer: Some(answer.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_time_answer_is_normalized() {
        let mut schedule = exam_with_prep_task();
        apply_answer(&mut schedule, &request("meeting-1", "time", "3pm")).unwrap();
        assert_eq!(schedule.meetings[0].time, Some(TimeOfDay::clock(15, 0)));
        assert!(!schedule.meetings[0].missing_info.contains(&FieldName::Time));
    }

    #[test]
    fn test_null_equivalent_time_answer_keeps_question_pending() {
        let mut schedule = exam_with_prep_task();
        let outcome = apply_answer(&mut schedule, &request("meeting-1", "time", "null")).unwrap();
        assert_eq!(schedule.meetings[0].time, None);
        assert!(schedule.meetings[0].missing_info.contains(&FieldName::Time));
        assert!(outcome.questions.iter().any(|q| q.kind == QuestionKind::Time));
    }

    #[test]
    fn test_ambiguous_answer_stored_as_marker() {
        let mut schedule = exam_with_prep_task();
        apply_answer(&mut schedule, &request("meeting-1", "time", "9:00")).unwrap();
        assert_eq!(schedule.meetings[0].time, Some(TimeOfDay::Ambiguous("9:00".to_string())));
    }

    #[test]
    fn test_duration_coerced_to_minutes() {
        let mut schedule = exam_with_prep_task();
        apply_answer(&mut schedule, &request("meeting-1", "duration", "90")).unwrap();
        assert_eq!(schedule.meetings[0].duration_minutes, Some(90));

        let err = apply_answer(&mut schedule, &request("meeting-1", "duration", "ninety")).unwrap_err();
        assert!(matches!(err, ClarifyError::InvalidInput(_)));
        let err = apply_answer(&mut schedule, &request("meeting-1", "duration", "0")).unwrap_err();
        assert!(matches!(err, ClarifyError::InvalidInput(_)));
    }

    #[test]
    fn test_course_code_propagates_to_related_task() {
        let mut schedule = exam_with_prep_task();
        let outcome = apply_answer(&mut schedule, &request("meeting-1", "course_code", "CS101")).unwrap();

        assert_eq!(schedule.meetings[0].course_code.as_deref(), Some("CS101"));
        assert_eq!(schedule.tasks[0].course_code.as_deref(), Some("CS101"));
        assert!(!schedule.tasks[0].missing_info.contains(&FieldName::CourseCode));
        assert!(schedule.course_codes.contains(&"CS101".to_string()));

        // No course-code question remains for either item
        assert!(outcome.questions.iter().all(|q| q.kind != QuestionKind::CourseCode));
    }

    #[test]
    fn test_propagation_skips_tasks_with_codes() {
        let mut schedule = exam_with_prep_task();
        schedule.tasks[0].course_code = Some("CS304".to_string());
        apply_answer(&mut schedule, &request("meeting-1", "course_code", "CS101")).unwrap();
        assert_eq!(schedule.tasks[0].course_code.as_deref(), Some("CS304"));
    }

    #[test]
    fn test_task_course_code_answer_does_not_propagate() {
        let mut schedule = exam_with_prep_task();
        apply_answer(&mut schedule, &request("task-1", "course_code", "CS101")).unwrap();
        assert_eq!(schedule.tasks[0].course_code.as_deref(), Some("CS101"));
        // Meeting untouched
        assert_eq!(schedule.meetings[0].course_code, None);
    }

    #[test]
    fn test_not_found_leaves_schedule_unchanged() {
        let mut schedule = exam_with_prep_task();
        let before = schedule.clone();
        let err = apply_answer(&mut schedule, &request("meeting-9", "time", "10:00")).unwrap_err();
        assert!(matches!(err, ClarifyError::NotFound(_)));
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_missing_fields_rejected_before_mutation() {
        let mut schedule = exam_with_prep_task();
        let before = schedule.clone();

        for broken in [
            AnswerRequest {
                kind: Some("time".to_string()),
                answer: Some("10:00".to_string()),
                ..Default::default()
            },
            AnswerRequest {
                item_id: Some("meeting-1".to_string()),
                answer: Some("10:00".to_string()),
                ..Default::default()
            },
            AnswerRequest {
                item_id: Some("meeting-1".to_string()),
                kind: Some("time".to_string()),
                ..Default::default()
            },
            request("meeting-1", "weekday", "Monday"),
        ] {
            let err = apply_answer(&mut schedule, &broken).unwrap_err();
            assert!(matches!(err, ClarifyError::InvalidInput(_)), "{:?}", broken);
            assert_eq!(schedule, before);
        }
    }

    #[test]
    fn test_convergence_flags() {
        let mut schedule = exam_with_prep_task();

        let outcome = apply_answer(&mut schedule, &request("meeting-1", "time", "09:00")).unwrap();
        assert!(outcome.has_more_questions);
        assert!(!outcome.ready_for_optimization);

        let outcome = apply_answer(&mut schedule, &request("meeting-1", "duration", "120")).unwrap();
        assert!(outcome.has_more_questions);

        let outcome = apply_answer(&mut schedule, &request("meeting-1", "course_code", "CS101")).unwrap();
        assert!(!outcome.has_more_questions);
        assert!(outcome.ready_for_optimization);
        assert!(outcome.questions.is_empty());

        // Stable: recomputing afterwards still yields nothing
        assert!(find_questions(&schedule).is_empty());
    }

    #[test]
    fn test_answer_request_for_question() {
        let schedule = exam_with_prep_task();
        let questions = find_questions(&schedule);
        let request = AnswerRequest::for_question(&questions[0], "10:00");
        assert_eq!(request.item_id.as_deref(), Some("meeting-1"));
        assert_eq!(request.kind.as_deref(), Some("time"));
        assert_eq!(request.target_type.as_deref(), Some("meeting"));
    }

    #[test]
    fn test_target_type_unused_in_lookup() {
        // Lookup is by id across both collections; the target_type hint is
        // informational and may be absent or wrong without effect
        let mut schedule = exam_with_prep_task();
        let mut req = request("task-1", "course_code", "CS101");
        req.target_type = Some(TargetType::Meeting.to_string());
        apply_answer(&mut schedule, &req).unwrap();
        assert_eq!(schedule.tasks[0].course_code.as_deref(), Some("CS101"));
    }
}
