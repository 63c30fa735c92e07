use crate::cli_args::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const MODEL_ENV: &str = "LLM_COMMIT_MODEL";
pub const TEMPERATURE_ENV: &str = "LLM_COMMIT_TEMPERATURE";
pub const DYNAMIC_LENGTH_ENV: &str = "LLM_COMMIT_DYNAMIC_LENGTH";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const SMALL_CHANGE_THRESHOLD: usize = 50;
pub const LARGE_CHANGE_THRESHOLD: usize = 200;
pub const SMALL_CHANGE_TOKENS: u32 = 100;
pub const MEDIUM_CHANGE_TOKENS: u32 = 200;
pub const LARGE_CHANGE_TOKENS: u32 = 400;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Provider prefix applied to model names routed through OpenRouter.
const OPENROUTER_MODEL_PREFIX: &str = "openai";

/// The environment variables we care about, read once at startup.
///
/// Empty values are treated the same as unset ones, except for the
/// temperature, which must parse if it is set at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub model: Option<String>,
    pub temperature: Option<String>,
    pub dynamic_length: Option<String>,
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
}

impl EnvSnapshot {
    /// Read the process environment.
    pub fn capture() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        EnvSnapshot {
            model: get(MODEL_ENV),
            temperature: lookup(TEMPERATURE_ENV),
            dynamic_length: get(DYNAMIC_LENGTH_ENV),
            openai_api_key: get(OPENAI_API_KEY_ENV),
            openrouter_api_key: get(OPENROUTER_API_KEY_ENV),
        }
    }

    /// Command-line flags overwrite the matching environment values.
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.dynamic_length {
            self.dynamic_length = Some("true".to_string());
        }
    }

    pub fn uses_openrouter(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}

/// Optional defaults from `~/.config/git-llm-commit.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub dynamic_length: Option<bool>,
}

impl FileConfig {
    pub fn parse(path: &Path, data: &str) -> Result<Self, ConfigError> {
        toml::from_str::<FileConfig>(data).map_err(|source| ConfigError::FileParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the user config file. A missing file yields the empty config.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(FileConfig::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        log::debug!("Loading config file {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(path, &data)
    }
}

/// Return `~/.config/git-llm-commit.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("git-llm-commit.toml"))
}

/// Immutable settings for one commit-message run.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitConfig {
    pub model: String,
    pub temperature: f32,
    pub one_sentence_only: bool,
    pub small_change_threshold: usize,
    pub large_change_threshold: usize,
    pub small_change_tokens: u32,
    pub medium_change_tokens: u32,
    pub large_change_tokens: u32,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            one_sentence_only: true,
            small_change_threshold: SMALL_CHANGE_THRESHOLD,
            large_change_threshold: LARGE_CHANGE_THRESHOLD,
            small_change_tokens: SMALL_CHANGE_TOKENS,
            medium_change_tokens: MEDIUM_CHANGE_TOKENS,
            large_change_tokens: LARGE_CHANGE_TOKENS,
        }
    }
}

impl CommitConfig {
    /// Build the final config from the environment snapshot and config file.
    ///
    /// Precedence:
    ///   1. CLI flags (already folded into `env` by `apply_cli_overrides`)
    ///   2. Environment variables
    ///   3. TOML `~/.config/git-llm-commit.toml`
    ///   4. Built-in defaults
    pub fn resolve(env: &EnvSnapshot, file: &FileConfig) -> Result<Self, ConfigError> {
        let base_model = env
            .model
            .clone()
            .or_else(|| file.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let model = if env.uses_openrouter() {
            format!("{OPENROUTER_MODEL_PREFIX}/{base_model}")
        } else {
            base_model
        };

        let temperature = match (&env.temperature, file.temperature) {
            (Some(raw), _) => parse_temperature(raw, TEMPERATURE_ENV)?,
            (None, Some(t)) => check_temperature(t, &t.to_string(), "config file")?,
            (None, None) => DEFAULT_TEMPERATURE,
        };

        let dynamic_length = match &env.dynamic_length {
            Some(flag) => flag.trim().eq_ignore_ascii_case("true"),
            None => file.dynamic_length.unwrap_or(false),
        };

        Ok(CommitConfig {
            model,
            temperature,
            one_sentence_only: !dynamic_length,
            ..CommitConfig::default()
        })
    }
}

fn parse_temperature(raw: &str, origin: &'static str) -> Result<f32, ConfigError> {
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|_| ConfigError::InvalidTemperature {
            value: raw.to_string(),
            origin,
        })?;
    check_temperature(value, raw, origin)
}

fn check_temperature(value: f32, raw: &str, origin: &'static str) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidTemperature {
            value: raw.to_string(),
            origin,
        });
    }
    if !(0.0..=1.0).contains(&value) {
        log::warn!("Temperature {value} from {origin} is outside the usual 0.0-1.0 range");
    }
    Ok(value)
}

/// Which API gateway serves the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    OpenRouter,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
        }
    }
}

/// Where and with which key the chat completion request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
}

impl ApiEndpoint {
    /// The OpenAI key is always required; an OpenRouter key switches the gateway.
    pub fn resolve(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let openai_key = env
            .openai_api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey)?;

        let endpoint = match &env.openrouter_api_key {
            Some(key) => ApiEndpoint {
                provider: Provider::OpenRouter,
                base_url: OPENROUTER_BASE_URL.to_string(),
                api_key: key.clone(),
            },
            None => ApiEndpoint {
                provider: Provider::OpenAi,
                base_url: OPENAI_BASE_URL.to_string(),
                api_key: openai_key,
            },
        };

        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn snapshot(vars: &[(&str, &str)]) -> EnvSnapshot {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvSnapshot::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = CommitConfig::resolve(&snapshot(&[]), &FileConfig::default()).unwrap();
        assert_eq!(cfg, CommitConfig::default());
        assert_eq!(cfg.model, "gpt-4-turbo");
        assert_eq!(cfg.temperature, 0.7);
        assert!(cfg.one_sentence_only);
        assert_eq!(cfg.small_change_threshold, 50);
        assert_eq!(cfg.large_change_threshold, 200);
        assert_eq!(
            (cfg.small_change_tokens, cfg.medium_change_tokens, cfg.large_change_tokens),
            (100, 200, 400)
        );
    }

    #[test]
    fn model_override_is_used_verbatim_without_openrouter() {
        let env = snapshot(&[(MODEL_ENV, "gpt-4o-mini")]);
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert_eq!(cfg.model, "gpt-4o-mini");
    }

    #[test]
    fn openrouter_key_qualifies_default_model() {
        let env = snapshot(&[(OPENROUTER_API_KEY_ENV, "or-key")]);
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert_eq!(cfg.model, "openai/gpt-4-turbo");
    }

    #[test]
    fn openrouter_key_qualifies_overridden_model() {
        let env = snapshot(&[(OPENROUTER_API_KEY_ENV, "or-key"), (MODEL_ENV, "gpt-4o")]);
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert_eq!(cfg.model, "openai/gpt-4o");
    }

    #[test]
    fn malformed_temperature_fails_fast() {
        let env = snapshot(&[(TEMPERATURE_ENV, "warm")]);
        let err = CommitConfig::resolve(&env, &FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemperature { ref value, .. } if value == "warm"));
    }

    #[test]
    fn blank_temperature_fails_fast() {
        for raw in ["", "   "] {
            let env = snapshot(&[(TEMPERATURE_ENV, raw)]);
            let err = CommitConfig::resolve(&env, &FileConfig::default()).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTemperature { ref value, .. } if value == raw),
                "raw {raw:?}"
            );
        }
    }

    #[test]
    fn non_finite_temperature_is_rejected() {
        let env = snapshot(&[(TEMPERATURE_ENV, "NaN")]);
        assert!(CommitConfig::resolve(&env, &FileConfig::default()).is_err());
    }

    #[test]
    fn temperature_is_parsed_from_environment() {
        let env = snapshot(&[(TEMPERATURE_ENV, " 0.2 ")]);
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert_eq!(cfg.temperature, 0.2);
    }

    #[test]
    fn dynamic_length_flag_is_case_insensitive() {
        for value in ["true", "TRUE", "True"] {
            let env = snapshot(&[(DYNAMIC_LENGTH_ENV, value)]);
            let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
            assert!(!cfg.one_sentence_only, "value {value:?}");
        }

        for value in ["1", "yes", "false"] {
            let env = snapshot(&[(DYNAMIC_LENGTH_ENV, value)]);
            let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
            assert!(cfg.one_sentence_only, "value {value:?}");
        }
    }

    #[test]
    fn cli_flag_overwrites_environment_flag() {
        let mut env = snapshot(&[(DYNAMIC_LENGTH_ENV, "false")]);
        let cli = Cli::parse_from(["git-llm-commit", "--dynamic-length"]);
        env.apply_cli_overrides(&cli);

        assert_eq!(env.dynamic_length.as_deref(), Some("true"));
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert!(!cfg.one_sentence_only);
    }

    #[test]
    fn absent_cli_flag_leaves_environment_alone() {
        let mut env = snapshot(&[(DYNAMIC_LENGTH_ENV, "true")]);
        let cli = Cli::parse_from(["git-llm-commit"]);
        env.apply_cli_overrides(&cli);
        assert_eq!(env.dynamic_length.as_deref(), Some("true"));
    }

    #[test]
    fn environment_beats_config_file() {
        let file = FileConfig {
            model: Some("file-model".into()),
            temperature: Some(0.1),
            dynamic_length: Some(true),
        };

        let cfg = CommitConfig::resolve(&snapshot(&[]), &file).unwrap();
        assert_eq!(cfg.model, "file-model");
        assert_eq!(cfg.temperature, 0.1);
        assert!(!cfg.one_sentence_only);

        let env = snapshot(&[
            (MODEL_ENV, "env-model"),
            (TEMPERATURE_ENV, "0.9"),
            (DYNAMIC_LENGTH_ENV, "false"),
        ]);
        let cfg = CommitConfig::resolve(&env, &file).unwrap();
        assert_eq!(cfg.model, "env-model");
        assert_eq!(cfg.temperature, 0.9);
        assert!(cfg.one_sentence_only);
    }

    #[test]
    fn parses_config_file() {
        let data = "model = \"gpt-4o\"\ntemperature = 0.3\ndynamic_length = true\n";
        let file = FileConfig::parse(Path::new("test.toml"), data).unwrap();
        assert_eq!(file.model.as_deref(), Some("gpt-4o"));
        assert_eq!(file.temperature, Some(0.3));
        assert_eq!(file.dynamic_length, Some(true));
    }

    #[test]
    fn missing_config_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".config").join("git-llm-commit.toml");
        assert_eq!(FileConfig::load_from(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn loads_config_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("git-llm-commit.toml");
        fs::write(&path, "model = \"gpt-4o-mini\"\ndynamic_length = true\n").unwrap();

        let file = FileConfig::load_from(&path).unwrap();
        assert_eq!(file.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(file.temperature, None);
        assert_eq!(file.dynamic_length, Some(true));
    }

    #[test]
    fn malformed_file_on_disk_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("git-llm-commit.toml");
        fs::write(&path, "model = [").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileParse { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn unreadable_config_path_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let err = FileConfig::parse(Path::new("test.toml"), "temperature = \"hot\"").unwrap_err();
        assert!(matches!(err, ConfigError::FileParse { .. }));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let env = snapshot(&[(OPENROUTER_API_KEY_ENV, ""), (MODEL_ENV, "  ")]);
        assert!(!env.uses_openrouter());
        let cfg = CommitConfig::resolve(&env, &FileConfig::default()).unwrap();
        assert_eq!(cfg.model, "gpt-4-turbo");
    }

    #[test]
    fn endpoint_requires_openai_key() {
        let err = ApiEndpoint::resolve(&snapshot(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn endpoint_switches_to_openrouter() {
        let env = snapshot(&[(OPENAI_API_KEY_ENV, "sk-1"), (OPENROUTER_API_KEY_ENV, "or-1")]);
        let endpoint = ApiEndpoint::resolve(&env).unwrap();
        assert_eq!(endpoint.provider, Provider::OpenRouter);
        assert_eq!(endpoint.base_url, OPENROUTER_BASE_URL);
        assert_eq!(endpoint.api_key, "or-1");

        let env = snapshot(&[(OPENAI_API_KEY_ENV, "sk-1")]);
        let endpoint = ApiEndpoint::resolve(&env).unwrap();
        assert_eq!(endpoint.provider, Provider::OpenAi);
        assert_eq!(endpoint.base_url, OPENAI_BASE_URL);
        assert_eq!(endpoint.api_key, "sk-1");
    }
}
