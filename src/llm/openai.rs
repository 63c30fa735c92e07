use super::{truncate, CompletionRequest, LlmClient};
use crate::config::ApiEndpoint;
use crate::error::LlmError;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimal request/response structs for the Chat Completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Blocking client for OpenAI-compatible gateways (OpenAI, OpenRouter).
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl OpenAiClient {
    pub fn new(endpoint: &ApiEndpoint) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .map_err(LlmError::Client)?;

        Ok(OpenAiClient {
            client,
            api_key: endpoint.api_key.clone(),
            api_base_url: endpoint.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }

    fn call_chat(&self, req: &ChatRequest<'_>) -> Result<String, LlmError> {
        let url = self.chat_url();

        log::info!("Calling model {:?} at {}", req.model, url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .map_err(|source| LlmError::Request {
                url: url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_resp: ChatResponse = resp.json().map_err(LlmError::Parse)?;

        if let Some(usage) = &chat_resp.usage {
            log::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        chat_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or(LlmError::NoChoices)
    }
}

impl LlmClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        log::trace!("System prompt:\n{}", request.system);
        log::trace!("User prompt:\n{}", truncate(&request.user, 3000));

        let req = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let spinner = waiting_spinner();
        let result = self.call_chat(&req);
        spinner.finish_and_clear();
        result
    }
}

/// Spinner on stderr while the model thinks; invisible when stderr is not a terminal.
fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Generating commit message...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
