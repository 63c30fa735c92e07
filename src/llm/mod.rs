pub mod openai;
pub mod prompt_builder;
mod prompts;

use crate::error::LlmError;

/// One chat completion request: a system/user prompt pair plus sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for talking to an LLM backend.
pub trait LlmClient {
    /// Return the raw text of the first completion choice.
    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Truncate long strings for debug logging.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...\n[truncated {} chars]", &s[..cut], s.len() - cut)
}
