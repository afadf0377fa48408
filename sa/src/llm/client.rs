//! ScheduleParser trait definition

use async_trait::async_trait;

use crate::domain::Schedule;

use super::LlmError;

/// Stateless schedule parser - each call is independent
///
/// Implementations turn a free-text description of commitments into a raw
/// schedule. The result may have any subset of fields null; resolving those
/// is the clarify engine's job, not the parser's.
#[async_trait]
pub trait ScheduleParser: Send + Sync {
    /// Parse free text into a raw schedule
    async fn parse_schedule(&self, text: &str) -> Result<Schedule, LlmError>;
}

/// Canned-response parser for tests and offline runs
pub struct MockParser {
    responses: std::sync::Mutex<std::collections::VecDeque<Schedule>>,
}

impl MockParser {
    pub fn new(responses: Vec<Schedule>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ScheduleParser for MockParser {
    async fn parse_schedule(&self, _text: &str) -> Result<Schedule, LlmError> {
        self.responses
            .lock()
            .expect("mock parser lock poisoned")
            .pop_front()
            .ok_or_else(|| LlmError::InvalidResponse("No more mock responses".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_parser_drains_responses() {
        let parser = MockParser::new(vec![Schedule::default()]);
        assert!(parser.parse_schedule("anything").await.is_ok());
        let err = parser.parse_schedule("anything").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
