mod cli_args;
mod config;
mod diff_size;
mod editor;
mod error;
mod flow;
mod generator;
mod git;
mod llm;
mod logging;
mod risky;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use crate::cli_args::Cli;
use crate::config::{ApiEndpoint, CommitConfig, EnvSnapshot, FileConfig};
use crate::editor::ExternalEditor;
use crate::flow::{CommitFlow, FlowOutcome};
use crate::generator::CommitMessageGenerator;
use crate::git::GitCli;
use crate::llm::openai::OpenAiClient;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code() as u8),
        Err(err) => {
            log::debug!("Fatal: {err:?}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<FlowOutcome> {
    load_dotenv();

    // Everything below sees the environment only through this snapshot.
    let mut env = EnvSnapshot::capture();
    env.apply_cli_overrides(cli);

    let endpoint = ApiEndpoint::resolve(&env)?;
    let file_cfg = FileConfig::load()?;
    let config = CommitConfig::resolve(&env, &file_cfg)?;

    log::info!(
        "Using model {} via {} (temperature={}, one_sentence_only={})",
        config.model,
        endpoint.provider.as_str(),
        config.temperature,
        config.one_sentence_only
    );

    let client = OpenAiClient::new(&endpoint)?;
    let generator = CommitMessageGenerator::new(&client, &config);
    let git = GitCli;
    let editor = ExternalEditor;

    let outcome = CommitFlow::new(
        &git,
        &generator,
        &editor,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .run()?;

    Ok(outcome)
}

/// Load `.env` from the working directory; real environment variables win.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("Ignoring unreadable .env file: {err}"),
    }
}
