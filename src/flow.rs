//! The interactive commit flow as an explicit state machine.
//!
//! ```text
//! Start -> RiskyCheck -> (Aborted | DiffCheck) -> (NoChanges | Generating)
//!       -> Presenting <-> Editing -> (Committed | Aborted)
//! ```
//!
//! Any collaborator or generation failure ends the flow with a `FlowError`.
//! Input and output are generic so tests can script a whole session.

use std::io::{BufRead, Write};

use crate::editor::MessageEditor;
use crate::error::FlowError;
use crate::generator::CommitMessageGenerator;
use crate::git::VersionControl;
use crate::risky::detect_risky_files;

const SEPARATOR: &str = "------------------------";
const ABORTED: &str = "Commit aborted.";
const NO_CHANGES: &str = "No staged changes found. Please stage your changes and try again.";
const CONFIRM_PROMPT: &str = "\nDo you want to commit with this message? (y/n/e[dit]): ";
const USAGE_HINT: &str = "Please enter 'y' to commit, 'n' to abort, or 'e' to edit the message.";
const RISKY_PROMPT: &str = "\nCommit anyway? (y/N): ";
const EMPTY_MESSAGE: &str = "Commit message is empty. Edit it or abort.";

/// How a flow that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Committed,
    NoChanges,
    /// The user turned down the drafted message.
    Rejected,
    /// The user declined to commit risky files.
    RiskyAborted,
}

impl FlowOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowOutcome::RiskyAborted => 1,
            FlowOutcome::Committed | FlowOutcome::NoChanges | FlowOutcome::Rejected => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    Start,
    RiskyCheck,
    DiffCheck { staged_files: usize },
    Generating { diff: String },
    Presenting { message: String },
    Editing { message: String },
    Done(FlowOutcome),
}

/// The user's answer at the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
    Edit,
}

impl Decision {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Decision::Accept),
            "n" | "no" => Some(Decision::Reject),
            "e" | "edit" => Some(Decision::Edit),
            _ => None,
        }
    }
}

pub struct CommitFlow<'a, R, W> {
    vcs: &'a dyn VersionControl,
    generator: &'a CommitMessageGenerator<'a>,
    editor: &'a dyn MessageEditor,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> CommitFlow<'a, R, W> {
    pub fn new(
        vcs: &'a dyn VersionControl,
        generator: &'a CommitMessageGenerator<'a>,
        editor: &'a dyn MessageEditor,
        input: R,
        output: W,
    ) -> Self {
        CommitFlow {
            vcs,
            generator,
            editor,
            input,
            output,
        }
    }

    /// Drive the machine until it reaches a terminal state.
    pub fn run(&mut self) -> Result<FlowOutcome, FlowError> {
        let mut state = FlowState::Start;
        loop {
            state = match state {
                FlowState::Done(outcome) => {
                    log::info!("Commit flow finished: {outcome:?}");
                    return Ok(outcome);
                }
                other => self.step(other)?,
            };
        }
    }

    fn step(&mut self, state: FlowState) -> Result<FlowState, FlowError> {
        match state {
            FlowState::Start => Ok(FlowState::RiskyCheck),
            FlowState::RiskyCheck => self.check_risky_files(),
            FlowState::DiffCheck { staged_files } => self.check_diff(staged_files),
            FlowState::Generating { diff } => {
                let message = self.generator.generate(&diff)?;
                Ok(FlowState::Presenting { message })
            }
            FlowState::Presenting { message } => self.present(message),
            FlowState::Editing { message } => {
                let editor = self.vcs.preferred_editor()?;
                let message = self.editor.edit(&message, &editor)?;
                Ok(FlowState::Presenting { message })
            }
            FlowState::Done(outcome) => Ok(FlowState::Done(outcome)),
        }
    }

    fn check_risky_files(&mut self) -> Result<FlowState, FlowError> {
        let files = self.vcs.staged_files()?;
        let risky = detect_risky_files(&files);

        if !risky.is_empty() {
            log::warn!("{} potentially risky file(s) staged", risky.len());

            writeln!(self.output, "\nPotentially risky files staged:")?;
            for file in &risky {
                writeln!(self.output, "  - {file}")?;
            }

            let answer = self.ask(RISKY_PROMPT)?.unwrap_or_default();
            if !answer.trim().to_lowercase().starts_with('y') {
                writeln!(self.output, "{ABORTED}")?;
                return Ok(FlowState::Done(FlowOutcome::RiskyAborted));
            }
        }

        Ok(FlowState::DiffCheck {
            staged_files: files.len(),
        })
    }

    fn check_diff(&mut self, staged_files: usize) -> Result<FlowState, FlowError> {
        let diff = self.vcs.staged_diff()?;

        if diff.trim().is_empty() {
            if staged_files > 0 {
                log::warn!("git listed {staged_files} staged file(s) but the staged diff is empty");
            }
            writeln!(self.output, "{NO_CHANGES}")?;
            return Ok(FlowState::Done(FlowOutcome::NoChanges));
        }

        Ok(FlowState::Generating { diff })
    }

    fn present(&mut self, message: String) -> Result<FlowState, FlowError> {
        writeln!(self.output, "\nGenerated commit message:")?;
        writeln!(self.output, "{SEPARATOR}")?;
        writeln!(self.output, "{message}")?;
        writeln!(self.output, "{SEPARATOR}")?;

        let Some(answer) = self.ask(CONFIRM_PROMPT)? else {
            // stdin closed; nothing more can be asked
            writeln!(self.output, "\n{ABORTED}")?;
            return Ok(FlowState::Done(FlowOutcome::Rejected));
        };

        match Decision::parse(&answer) {
            Some(Decision::Accept) if message.trim().is_empty() => {
                writeln!(self.output, "{EMPTY_MESSAGE}")?;
                Ok(FlowState::Presenting { message })
            }
            Some(Decision::Accept) => {
                self.vcs.commit(&message)?;
                Ok(FlowState::Done(FlowOutcome::Committed))
            }
            Some(Decision::Reject) => {
                writeln!(self.output, "{ABORTED}")?;
                Ok(FlowState::Done(FlowOutcome::Rejected))
            }
            Some(Decision::Edit) => Ok(FlowState::Editing { message }),
            None => {
                writeln!(self.output, "{USAGE_HINT}")?;
                Ok(FlowState::Presenting { message })
            }
        }
    }

    /// Print a prompt and read one line. `None` means end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, FlowError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}
