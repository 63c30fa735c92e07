//! Flags staged paths that look like secrets or credentials.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

/// Checked in order; the first match wins for a given path.
pub const DEFAULT_PATTERNS: &[&str] = &[
    r"\.env$",
    r"\.secret$",
    r"credentials.*",
    r".*_key$",
    r"secrets?\.(yml|yaml|json|toml)$",
];

static DEFAULT_DETECTOR: LazyLock<RiskyFileDetector> = LazyLock::new(|| {
    RiskyFileDetector::with_patterns(DEFAULT_PATTERNS)
        .expect("default risky-file patterns are valid")
});

pub struct RiskyFileDetector {
    patterns: Vec<Regex>,
}

impl RiskyFileDetector {
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RiskyFileDetector { patterns })
    }

    /// Return the paths matching any pattern, in input order, each at most once.
    pub fn detect(&self, files: &[String]) -> Vec<String> {
        files
            .iter()
            .filter(|file| self.patterns.iter().any(|p| p.is_match(file)))
            .cloned()
            .collect()
    }
}

/// Scan staged paths with the default patterns.
pub fn detect_risky_files(files: &[String]) -> Vec<String> {
    DEFAULT_DETECTOR.detect(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_dotenv_only() {
        assert_eq!(detect_risky_files(&paths(&[".env", "notes.txt"])), paths(&[".env"]));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(detect_risky_files(&[]).is_empty());
    }

    #[test]
    fn each_pattern_matches() {
        let files = paths(&[
            "config/prod.env",
            "vault.secret",
            "aws/credentials",
            "deploy/ssh_key",
            "secrets.yml",
            "config/secret.json",
            "app/secrets.toml",
            "secrets.yaml",
        ]);
        assert_eq!(detect_risky_files(&files), files);
    }

    #[test]
    fn file_matching_several_patterns_appears_once() {
        // matches both `credentials.*` and `\.env$`
        let files = paths(&["credentials.env", "src/main.rs"]);
        assert_eq!(detect_risky_files(&files), paths(&["credentials.env"]));
    }

    #[test]
    fn matching_is_unanchored_search() {
        assert_eq!(
            detect_risky_files(&paths(&["docs/credentials-howto.md"])),
            paths(&["docs/credentials-howto.md"])
        );
    }

    #[test]
    fn ordinary_files_pass() {
        let files = paths(&[
            "src/env.rs",
            ".env.example",
            "keyboard.rs",
            "secrets.rs",
            "README.md",
        ]);
        assert!(detect_risky_files(&files).is_empty());
    }

    #[test]
    fn custom_patterns() {
        let detector = RiskyFileDetector::with_patterns(&[r"\.pem$"]).unwrap();
        assert_eq!(
            detector.detect(&paths(&["tls/server.pem", ".env"])),
            paths(&["tls/server.pem"])
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = RiskyFileDetector::with_patterns(&["("]).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
