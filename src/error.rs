//! Error types for git-llm-commit, one enum per concern.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors from the git collaborator.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: io::Error,
    },

    #[error("git {args} exited with status {status}")]
    Failed { args: String, status: ExitStatus },

    #[error("git {args} returned no editor")]
    NoEditor { args: String },
}

/// Errors from launching the external editor on a draft.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("no editor configured")]
    Empty,

    #[error("failed to prepare temporary message file: {0}")]
    TempFile(#[source] io::Error),

    #[error("failed to launch editor '{editor}': {source}")]
    Spawn {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("editor '{editor}' exited with status {status}")]
    Failed { editor: String, status: ExitStatus },

    #[error("failed to read edited message: {0}")]
    Read(#[source] io::Error),
}

/// Errors from the language-model transport.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: HTTP {status} - {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(#[source] reqwest::Error),

    #[error("no choices returned from API")]
    NoChoices,
}

/// Errors from drafting a commit message.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Error calling language model API: {source}")]
    Provider {
        #[source]
        source: LlmError,
    },

    #[error("Received empty response from language model API")]
    EmptyResponse,
}

/// Errors from resolving configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY environment variable is not set.")]
    MissingApiKey,

    #[error("invalid temperature '{value}' from {origin}: expected a number between 0.0 and 1.0")]
    InvalidTemperature { value: String, origin: &'static str },

    #[error("invalid risky-file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Fatal errors that end the interactive commit flow.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
