use crate::config::CommitConfig;
use crate::diff_size::DiffStats;
use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// The Conventional Commits grammar and rules for the chosen length mode.
pub fn system_prompt(one_sentence_only: bool) -> String {
    let (layout, rules) = if one_sentence_only {
        (prompts::HEADER_FORMAT, prompts::ONE_SENTENCE_RULES)
    } else {
        (prompts::FULL_FORMAT, prompts::GRADUATED_RULES)
    };

    format!(
        "{preamble}\n\n{layout}\n\nWhere:\n  - type is one of: {types}.\n{scope}\n{rules}",
        preamble = prompts::SYSTEM_PREAMBLE,
        layout = layout,
        types = prompts::CONVENTIONAL_COMMIT_TYPES.join(", "),
        scope = prompts::SCOPE_RULE,
        rules = rules,
    )
}

/// The diff itself plus its size tier and, in one-sentence mode, the length limit.
pub fn user_prompt(diff: &str, stats: &DiffStats, one_sentence_only: bool) -> String {
    let level = stats.size.detail_level();
    let length_instruction = if one_sentence_only {
        prompts::ONE_SENTENCE_INSTRUCTION
    } else {
        ""
    };

    format!(
        "Git diff:\n\n{diff}\n\n\
         Generate a {level} commit message following the Conventional Commits specification. \
         {length_instruction}This is a {level} change with {lines} lines modified.",
        lines = stats.changed_lines,
    )
}

pub fn commit_message_prompt(diff: &str, stats: &DiffStats, config: &CommitConfig) -> PromptPair {
    PromptPair {
        system: system_prompt(config.one_sentence_only),
        user: user_prompt(diff, stats, config.one_sentence_only),
    }
}
