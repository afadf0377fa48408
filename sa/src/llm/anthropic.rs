//! Anthropic Messages API schedule parser
//!
//! A thin bridge: one prompt in, one JSON schedule out. All business logic
//! stays in the clarify engine; this client only shuttles text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::domain::Schedule;

use super::prompt::build_schedule_prompt;
use super::{LlmError, ScheduleParser};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client implementing [`ScheduleParser`]
pub struct AnthropicParser {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl AnthropicParser {
    /// Create a client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    fn build_request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 0.2,
            "messages": [
                {"role": "user", "content": build_schedule_prompt(text)}
            ],
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Pull the first top-level JSON object out of a completion
///
/// Models wrap JSON in prose or code fences often enough that taking the
/// outermost brace pair is the robust move.
fn extract_json(text: &str) -> Result<&str, LlmError> {
    let start = text
        .find('{')
        .ok_or_else(|| LlmError::InvalidResponse("completion contains no JSON object".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| LlmError::InvalidResponse("completion contains an unterminated JSON object".to_string()))?;
    Ok(&text[start..=end])
}

#[async_trait]
impl ScheduleParser for AnthropicParser {
    async fn parse_schedule(&self, text: &str) -> Result<Schedule, LlmError> {
        debug!(model = %self.model, text_len = text.len(), "parse_schedule: calling Anthropic API");

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_request_body(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "parse_schedule: API returned error");
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response.json().await?;
        let completion = body
            .content
            .first()
            .map(|block| block.text.as_str())
            .ok_or_else(|| LlmError::InvalidResponse("completion has no content blocks".to_string()))?;

        let schedule: Schedule = serde_json::from_str(extract_json(completion)?)?;
        debug!(
            meetings = schedule.meetings.len(),
            tasks = schedule.tasks.len(),
            "parse_schedule: parsed schedule"
        );
        Ok(schedule)
    }
}
