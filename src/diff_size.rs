//! Change-size classification for staged diffs.
//!
//! The diff is never parsed; the only metric is the number of added or
//! removed lines, which picks the detail level and token budget of the
//! generated message.

use crate::config::CommitConfig;

/// Count lines that start with a single `+` or `-`.
///
/// File header lines (`+++ b/...`, `--- a/...`) are not changes.
pub fn count_changed_lines(diff: &str) -> usize {
    diff.lines()
        .filter(|line| line.starts_with('+') || line.starts_with('-'))
        .filter(|line| !line.starts_with("+++") && !line.starts_with("---"))
        .count()
}

/// How much detail a change warrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Moderate,
    Detailed,
}

impl SizeClass {
    /// Thresholds are inclusive upper bounds.
    pub fn classify(changed_lines: usize, config: &CommitConfig) -> Self {
        if changed_lines <= config.small_change_threshold {
            SizeClass::Small
        } else if changed_lines <= config.large_change_threshold {
            SizeClass::Moderate
        } else {
            SizeClass::Detailed
        }
    }

    /// The adjective used in the prompt.
    pub fn detail_level(&self) -> &'static str {
        match self {
            SizeClass::Small => "concise",
            SizeClass::Moderate => "moderate",
            SizeClass::Detailed => "detailed",
        }
    }

    pub fn token_budget(&self, config: &CommitConfig) -> u32 {
        match self {
            SizeClass::Small => config.small_change_tokens,
            SizeClass::Moderate => config.medium_change_tokens,
            SizeClass::Detailed => config.large_change_tokens,
        }
    }
}

/// Everything derived from a diff's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub changed_lines: usize,
    pub size: SizeClass,
    pub max_tokens: u32,
}

impl DiffStats {
    pub fn measure(diff: &str, config: &CommitConfig) -> Self {
        let changed_lines = count_changed_lines(diff);
        let size = SizeClass::classify(changed_lines, config);
        DiffStats {
            changed_lines,
            size,
            max_tokens: size.token_budget(config),
        }
    }
}
