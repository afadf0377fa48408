//! SessionManager - actor that owns the schedule store
//!
//! Processes commands via channels so at most one mutation is in flight,
//! which is the serialization the store's contract requires.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use schedstore::{Slot, Store};

use crate::clarify::{AnswerRequest, apply_answer, find_questions};
use crate::domain::{Question, Schedule};
use crate::intake::{self, IntakeOutcome, IntakeStatus};

use super::messages::{AnswerReply, StateCommand, StateError, StateResponse};

/// Handle to send commands to the session actor
#[derive(Clone)]
pub struct SessionManager {
    tx: mpsc::Sender<StateCommand>,
}

impl SessionManager {
    /// Spawn a new session actor owning an empty store
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(actor_loop(Store::new(), rx));
        debug!("SessionManager spawned");
        Self { tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<StateResponse<T>>) -> StateCommand,
    ) -> StateResponse<T> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).await.map_err(|_| StateError::Channel)?;
        rx.await.map_err(|_| StateError::Channel)?
    }

    /// Ingest a freshly parsed schedule, replacing the working instance
    pub async fn ingest(&self, schedule: Schedule) -> StateResponse<IntakeOutcome> {
        self.request(|reply| StateCommand::Ingest { schedule, reply }).await
    }

    /// Current question list for the working schedule
    pub async fn questions(&self) -> StateResponse<Vec<Question>> {
        self.request(|reply| StateCommand::Questions { reply }).await
    }

    /// Apply one answer to the working schedule
    pub async fn answer(&self, request: AnswerRequest) -> StateResponse<AnswerReply> {
        self.request(|reply| StateCommand::Answer { request, reply }).await
    }

    /// Load the selected schedule instance
    pub async fn get_schedule(&self, slot: Slot) -> StateResponse<Schedule> {
        self.request(|reply| StateCommand::GetSchedule { slot, reply }).await
    }

    /// Clear both schedule instances
    pub async fn reset(&self) -> StateResponse<()> {
        self.request(|reply| StateCommand::Reset { reply }).await
    }

    /// Stop the actor; pending commands are processed first
    pub async fn shutdown(&self) {
        let _ = self.tx.send(StateCommand::Shutdown).await;
    }
}

async fn actor_loop(mut store: Store<Schedule>, mut rx: mpsc::Receiver<StateCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            StateCommand::Ingest { schedule, reply } => {
                let outcome = intake::ingest(schedule);
                store.save(outcome.schedule.clone(), Slot::Working);
                if outcome.status == IntakeStatus::Complete && !outcome.schedule.is_empty() {
                    info!("actor: ingested schedule is complete, promoting to final");
                    store.save(outcome.schedule.clone(), Slot::Final);
                }
                let _ = reply.send(Ok(outcome));
            }
            StateCommand::Questions { reply } => {
                let schedule = store.load(Slot::Working);
                let _ = reply.send(Ok(find_questions(&schedule)));
            }
            StateCommand::Answer { request, reply } => {
                let _ = reply.send(handle_answer(&mut store, &request));
            }
            StateCommand::GetSchedule { slot, reply } => {
                let _ = reply.send(Ok(store.load(slot)));
            }
            StateCommand::Reset { reply } => {
                store.reset();
                let _ = reply.send(Ok(()));
            }
            StateCommand::Shutdown => break,
        }
    }
    debug!("actor: loop exited");
}

fn handle_answer(store: &mut Store<Schedule>, request: &AnswerRequest) -> StateResponse<AnswerReply> {
    if !store.is_saved(Slot::Working) {
        return Err(StateError::NotFound("no schedule has been stored".to_string()));
    }

    let mut schedule = store.load(Slot::Working);
    let outcome = apply_answer(&mut schedule, request)?;

    store.save(schedule.clone(), Slot::Working);
    if outcome.ready_for_optimization {
        info!("actor: schedule converged, promoting to final");
        store.save(schedule.clone(), Slot::Final);
    }

    Ok(AnswerReply {
        schedule,
        ready_for_optimization: outcome.ready_for_optimization,
        has_more_questions: outcome.has_more_questions,
        questions: outcome.questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incomplete_schedule() -> Schedule {
        serde_json::from_str(
            r#"{
                "meetings": [{
                    "id": "meeting-1",
                    "description": "CS101 Exam",
                    "day": "Monday",
                    "type": "exam"
                }],
                "tasks": [],
                "course_codes": []
            }"#,
        )
        .unwrap()
    }

    fn answer(item_id: &str, kind: &str, text: &str) -> AnswerRequest {
        AnswerRequest {
            item_id: Some(item_id.to_string()),
            kind: Some(kind.to_string()),
            answer: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_answer_without_stored_schedule_is_not_found() {
        let manager = SessionManager::spawn();
        let err = manager.answer(answer("meeting-1", "time", "10:00")).await.unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_ingest_then_converge() {
        let manager = SessionManager::spawn();

        let outcome = manager.ingest(incomplete_schedule()).await.unwrap();
        assert_eq!(outcome.status, IntakeStatus::QuestionsNeeded);
        assert_eq!(outcome.questions.len(), 3);

        let reply = manager.answer(answer("meeting-1", "time", "9am")).await.unwrap();
        assert!(reply.has_more_questions);
        assert!(!reply.ready_for_optimization);

        manager.answer(answer("meeting-1", "duration", "120")).await.unwrap();
        let reply = manager.answer(answer("meeting-1", "course_code", "CS101")).await.unwrap();
        assert!(!reply.has_more_questions);
        assert!(reply.ready_for_optimization);

        // Converged schedule was promoted to the final instance
        let final_schedule = manager.get_schedule(Slot::Final).await.unwrap();
        assert_eq!(final_schedule, reply.schedule);
        assert!(manager.questions().await.unwrap().is_empty());

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_complete_ingest_promotes_to_final() {
        let manager = SessionManager::spawn();
        let complete: Schedule = serde_json::from_str(
            r#"{
                "meetings": [{
                    "id": "m1",
                    "description": "CS101 Lecture",
                    "day": "Monday",
                    "time": "09:00",
                    "duration_minutes": 60,
                    "type": "regular",
                    "course_code": "CS101"
                }],
                "tasks": [],
                "course_codes": ["CS101"]
            }"#,
        )
        .unwrap();

        let outcome = manager.ingest(complete).await.unwrap();
        assert_eq!(outcome.status, IntakeStatus::Complete);
        assert!(!manager.get_schedule(Slot::Final).await.unwrap().is_empty());

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_reset_clears_both_instances() {
        let manager = SessionManager::spawn();
        manager.ingest(incomplete_schedule()).await.unwrap();
        manager.reset().await.unwrap();

        assert_eq!(manager.get_schedule(Slot::Working).await.unwrap(), Schedule::default());
        assert_eq!(manager.get_schedule(Slot::Final).await.unwrap(), Schedule::default());

        // After reset the store is back to never-saved: answers are rejected
        let err = manager.answer(answer("meeting-1", "time", "10:00")).await.unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_invalid_answer_surfaces_and_preserves_state() {
        let manager = SessionManager::spawn();
        manager.ingest(incomplete_schedule()).await.unwrap();

        let err = manager.answer(answer("meeting-1", "duration", "soon")).await.unwrap_err();
        assert!(matches!(err, StateError::InvalidInput(_)));

        // Working schedule unchanged: all three questions remain
        assert_eq!(manager.questions().await.unwrap().len(), 3);

        manager.shutdown().await;
    }
}
