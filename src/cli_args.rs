use clap::{ArgAction, Parser};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "git-llm-commit",
    version,
    about = "Generate a Conventional Commits message for staged changes using an LLM",
    long_about = "Generate a Conventional Commits message for staged changes using an LLM.\n\n\
                  Stage your changes, then run `git llm-commit`. Requires OPENAI_API_KEY; \
                  set OPENROUTER_API_KEY to route requests through OpenRouter.\n\n\
                  Environment:\n  \
                  LLM_COMMIT_MODEL            model name (default: gpt-4-turbo)\n  \
                  LLM_COMMIT_TEMPERATURE      sampling temperature, 0.0-1.0 (default: 0.7)\n  \
                  LLM_COMMIT_DYNAMIC_LENGTH   \"true\" for multi-line messages scaled to the diff"
)]
pub struct Cli {
    /// Generate longer, multi-line messages scaled to the size of the change
    #[arg(short = 'd', long)]
    pub dynamic_length: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
