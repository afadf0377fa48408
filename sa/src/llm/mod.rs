//! LLM parser boundary
//!
//! The core never constructs prompts mid-flow or retries calls; this module
//! is the narrow interface to the external parsing step. It turns free text
//! into a [`crate::domain::Schedule`] and nothing else.

mod anthropic;
mod client;
mod error;
mod prompt;

pub use anthropic::AnthropicParser;
pub use client::{MockParser, ScheduleParser};
pub use error::LlmError;
pub use prompt::build_schedule_prompt;

use std::sync::Arc;

use tracing::debug;

use crate::config::LlmConfig;

/// Create a schedule parser for the provider named in config
pub fn create_parser(config: &LlmConfig) -> Result<Arc<dyn ScheduleParser>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_parser: called");
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicParser::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: anthropic",
            other
        ))),
    }
}
