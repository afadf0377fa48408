//! Missing-info analyzer
//!
//! Scans a schedule and emits an ordered question list: meetings first, then
//! tasks, each in schedule order, with per-item field order time → duration →
//! course code. Deterministic for identical input, so repeated calls produce
//! reproducible question sequences.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Question, QuestionKind, Schedule, TargetType};

/// Compute the ordered list of clarifying questions for a schedule
///
/// A preparation task linked (by `related_event` description) to a meeting
/// that is itself being asked for a course code gets no question of its own:
/// answering the meeting's question propagates to the task, so asking twice
/// would be redundant. Tasks whose related meeting already has its course
/// code - or that reference no meeting at all - are still asked.
pub fn find_questions(schedule: &Schedule) -> Vec<Question> {
    let mut questions = Vec::new();

    // Descriptions of meetings about to be asked for a course code. Matching
    // is by description string, not id: related_event is free text.
    let course_pending: HashSet<&str> = schedule
        .meetings
        .iter()
        .filter(|m| m.needs_course_code())
        .map(|m| m.description.as_str())
        .collect();

    for meeting in &schedule.meetings {
        let target_id = meeting.id.clone().unwrap_or_default();
        if meeting.time.is_none() {
            questions.push(Question {
                kind: QuestionKind::Time,
                question: format!("What time is the {}?", meeting.description),
                field: QuestionKind::Time.field(),
                target: meeting.description.clone(),
                target_type: TargetType::Meeting,
                target_id: target_id.clone(),
            });
        }
        if meeting.duration_minutes.is_none() {
            questions.push(Question {
                kind: QuestionKind::Duration,
                question: format!("How long is the {}?", meeting.description),
                field: QuestionKind::Duration.field(),
                target: meeting.description.clone(),
                target_type: TargetType::Meeting,
                target_id: target_id.clone(),
            });
        }
        if meeting.needs_course_code() {
            questions.push(Question {
                kind: QuestionKind::CourseCode,
                question: format!("What is the course code for the {}?", meeting.description),
                field: QuestionKind::CourseCode.field(),
                target: meeting.description.clone(),
                target_type: TargetType::Meeting,
                target_id,
            });
        }
    }

    for task in &schedule.tasks {
        if !task.needs_course_code() {
            continue;
        }
        let suppressed = task
            .related_event
            .as_deref()
            .is_some_and(|event| course_pending.contains(event));
        if suppressed {
            debug!(
                task = %task.description,
                related_event = ?task.related_event,
                "find_questions: suppressing course-code question, related meeting is being asked"
            );
            continue;
        }
        questions.push(Question {
            kind: QuestionKind::CourseCode,
            question: format!("What is the course code for the {}?", task.description),
            field: QuestionKind::CourseCode.field(),
            target: task.description.clone(),
            target_type: TargetType::Task,
            target_id: task.id.clone().unwrap_or_default(),
        });
    }

    questions
}
