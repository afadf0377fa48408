//! Integration tests for SchedAssist
//!
//! Drives the full clarify loop end-to-end: parse (mocked) → ingest → answer
//! every question → converged schedule in the final store instance.

use schedassist::clarify::AnswerRequest;
use schedassist::domain::{Question, QuestionKind, Schedule};
use schedassist::intake::IntakeStatus;
use schedassist::llm::{MockParser, ScheduleParser};
use schedassist::state::SessionManager;
use schedstore::Slot;

/// Parser output with several kinds of holes: an exam missing everything, a
/// lecture missing its duration, and a preparation task whose course code
/// should arrive by propagation.
fn incomplete_schedule() -> Schedule {
    serde_json::from_str(
        r#"{
            "meetings": [
                {
                    "description": "CS101 Exam",
                    "day": "Friday",
                    "time": null,
                    "duration_minutes": null,
                    "type": "exam",
                    "location": "Hall A",
                    "course_code": null
                },
                {
                    "description": "CS304 Lecture",
                    "day": "Monday",
                    "time": "2pm",
                    "duration_minutes": null,
                    "type": "regular",
                    "location": "Room 12",
                    "course_code": "CS304"
                }
            ],
            "tasks": [
                {
                    "description": "Study for exam",
                    "day": "Thursday",
                    "time": "19:00",
                    "duration_minutes": 120,
                    "priority": "high",
                    "category": "preparation",
                    "is_fixed_time": false,
                    "course_code": null,
                    "related_event": "CS101 Exam"
                }
            ],
            "course_codes": ["CS304"]
        }"#,
    )
    .unwrap()
}

/// A plausible user answer for any question kind
fn answer_for(question: &Question) -> &'static str {
    match question.kind {
        QuestionKind::Time => "10:00am",
        QuestionKind::Duration => "90",
        QuestionKind::CourseCode => "CS101",
    }
}

#[tokio::test]
async fn test_full_convergence_loop() {
    let parser = MockParser::new(vec![incomplete_schedule()]);
    let manager = SessionManager::spawn();

    // Parse (mocked) and ingest
    let raw = parser.parse_schedule("my schedule text").await.unwrap();
    let outcome = manager.ingest(raw).await.unwrap();
    assert_eq!(outcome.status, IntakeStatus::QuestionsNeeded);

    // Exam: time, duration, course code. Lecture: duration. Task: suppressed.
    assert_eq!(outcome.questions.len(), 4);
    let course_questions: Vec<_> = outcome
        .questions
        .iter()
        .filter(|q| q.kind == QuestionKind::CourseCode)
        .collect();
    assert_eq!(course_questions.len(), 1, "prep task question must be suppressed");

    // Answer one question at a time until nothing remains
    let mut questions = outcome.questions;
    let mut rounds = 0;
    let reply = loop {
        let question = questions.first().expect("questions remain but none offered");
        let reply = manager
            .answer(AnswerRequest::for_question(question, answer_for(question)))
            .await
            .unwrap();
        rounds += 1;
        assert!(rounds <= 8, "convergence took too many rounds");
        if reply.ready_for_optimization {
            break reply;
        }
        assert!(reply.has_more_questions);
        questions = reply.questions;
    };

    assert!(!reply.has_more_questions);
    assert!(reply.questions.is_empty());

    // The suppressed task got its course code by propagation
    let task = &reply.schedule.tasks[0];
    assert_eq!(task.course_code.as_deref(), Some("CS101"));
    assert!(reply.schedule.course_codes.contains(&"CS101".to_string()));

    // Stable: the working schedule yields no further questions
    assert!(manager.questions().await.unwrap().is_empty());

    // Converged schedule was promoted to the final instance
    let final_schedule = manager.get_schedule(Slot::Final).await.unwrap();
    assert_eq!(final_schedule, reply.schedule);

    manager.shutdown().await;
}

#[tokio::test]
async fn test_reset_restores_empty_schedules() {
    let manager = SessionManager::spawn();
    manager.ingest(incomplete_schedule()).await.unwrap();

    manager.reset().await.unwrap();

    let empty = Schedule::default();
    assert_eq!(manager.get_schedule(Slot::Working).await.unwrap(), empty);
    assert_eq!(manager.get_schedule(Slot::Final).await.unwrap(), empty);

    manager.shutdown().await;
}

#[tokio::test]
async fn test_unknown_item_rejected_without_mutation() {
    let manager = SessionManager::spawn();
    let before = manager.ingest(incomplete_schedule()).await.unwrap().schedule;

    let request = AnswerRequest {
        item_id: Some("not-a-real-id".to_string()),
        kind: Some("time".to_string()),
        answer: Some("10:00".to_string()),
        ..Default::default()
    };
    let err = manager.answer(request).await.unwrap_err();
    assert!(matches!(err, schedassist::state::StateError::NotFound(_)));

    let after = manager.get_schedule(Slot::Working).await.unwrap();
    assert_eq!(before, after);

    manager.shutdown().await;
}
