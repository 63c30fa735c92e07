pub const CONVENTIONAL_COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

pub const SYSTEM_PREAMBLE: &str = "You are a commit message generator that strictly follows the \
Conventional Commits specification. Given a git diff, generate a commit message that adheres to \
the following format:";

pub const HEADER_FORMAT: &str = "  <type>[optional scope]: <description>";

pub const FULL_FORMAT: &str = r#"  <type>[optional scope]: <description>

  [optional body]

  [optional footer(s)]"#;

pub const SCOPE_RULE: &str =
    "  - scope is optional and should be included if it clarifies the affected area of code.";

pub const ONE_SENTENCE_RULES: &str = r#"  - The description is a concise summary of the change in a single sentence.
  - DO NOT include a body or footer section.
  - Keep the subject line under 72 characters if possible.

Ensure that the commit message accurately reflects the essence of the changes shown in the diff."#;

pub const GRADUATED_RULES: &str = r#"  - The description is a concise summary of the change.
  - For small changes, provide only a clear description line.
  - For moderate changes, include a brief body explaining key changes.
  - For large changes, provide a detailed body and relevant footers.
  - The body (if provided) explains the reasoning and details of the change.
  - Footers (if applicable) may include BREAKING CHANGE information or issue references.

Ensure that the commit message comprehensively and accurately reflects all changes shown in the diff, with detail appropriate to the change size."#;

pub const ONE_SENTENCE_INSTRUCTION: &str = "The commit message should be a single sentence and \
only include a title line (no body or footer). Keep it under 72 characters if possible. ";
