//! Drafts a commit message for a diff through the language model.

use crate::config::CommitConfig;
use crate::diff_size::DiffStats;
use crate::error::GenerationError;
use crate::llm::prompt_builder;
use crate::llm::{CompletionRequest, LlmClient};

pub struct CommitMessageGenerator<'a> {
    client: &'a dyn LlmClient,
    config: &'a CommitConfig,
}

impl<'a> CommitMessageGenerator<'a> {
    pub fn new(client: &'a dyn LlmClient, config: &'a CommitConfig) -> Self {
        CommitMessageGenerator { client, config }
    }

    /// Generate a commit message for the given diff.
    ///
    /// Prompt detail and the output token budget scale with the number of
    /// changed lines. The response is trimmed and unwrapped from backticks.
    pub fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        let stats = DiffStats::measure(diff, self.config);
        log::debug!(
            "Diff has {} changed lines ({:?}), max_tokens={}",
            stats.changed_lines,
            stats.size,
            stats.max_tokens
        );

        let prompts = prompt_builder::commit_message_prompt(diff, &stats, self.config);
        let request = CompletionRequest {
            model: self.config.model.clone(),
            system: prompts.system,
            user: prompts.user,
            temperature: self.config.temperature,
            max_tokens: stats.max_tokens,
        };

        let raw = self
            .client
            .complete(&request)
            .map_err(|source| GenerationError::Provider { source })?;

        let message = clean_response(&raw);
        if message.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(message)
    }
}

/// Trim whitespace and any wrapping backticks, keeping inner layout intact.
pub fn clean_response(raw: &str) -> String {
    raw.trim().trim_matches('`').to_string()
}
