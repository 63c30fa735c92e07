//! Hands a draft commit message to the user's editor.

use std::fs;
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use tempfile::NamedTempFile;

use crate::error::EditorError;

pub trait MessageEditor {
    /// Return the full edited text (untrimmed).
    fn edit(&self, message: &str, editor: &str) -> Result<String, EditorError>;
}

/// Launches an external editor on a scratch file.
///
/// The scratch file is a `NamedTempFile`, so it is removed when the guard
/// drops, whether the editor succeeds, fails, or never starts.
#[derive(Debug, Default)]
pub struct ExternalEditor;

impl MessageEditor for ExternalEditor {
    fn edit(&self, message: &str, editor: &str) -> Result<String, EditorError> {
        let mut command = editor_command(editor)?;

        let mut file = tempfile::Builder::new()
            .prefix("git-llm-commit-")
            .suffix(".txt")
            .tempfile()
            .map_err(EditorError::TempFile)?;
        write_draft(&mut file, message)?;

        log::debug!("Opening {} with {editor}", file.path().display());

        let status = command
            .arg(file.path())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| EditorError::Spawn {
                editor: editor.to_string(),
                source,
            })?;

        if shell_could_not_find(&status) {
            return Err(EditorError::Spawn {
                editor: editor.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "command not found"),
            });
        }
        if !status.success() {
            return Err(EditorError::Failed {
                editor: editor.to_string(),
                status,
            });
        }

        // Re-open by path: some editors replace the file instead of writing in place.
        fs::read_to_string(file.path()).map_err(EditorError::Read)
    }
}

/// Build the command for an editor setting; the file path is appended by the caller.
///
/// On unix the setting goes through `sh` the way git runs `GIT_EDITOR`, so
/// arguments, quotes and paths with spaces behave as they do for `git commit`.
#[cfg(unix)]
fn editor_command(editor: &str) -> Result<Command, EditorError> {
    if editor.trim().is_empty() {
        return Err(EditorError::Empty);
    }
    let mut command = Command::new("sh");
    command.arg("-c").arg(format!("{editor} \"$@\"")).arg(editor);
    Ok(command)
}

/// Build the command for an editor setting, e.g. "code --wait".
#[cfg(not(unix))]
fn editor_command(editor: &str) -> Result<Command, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::Empty)?;
    let mut command = Command::new(program);
    command.args(parts);
    Ok(command)
}

/// `sh` exits 127 when the editor program does not exist.
#[cfg(unix)]
fn shell_could_not_find(status: &ExitStatus) -> bool {
    status.code() == Some(127)
}

#[cfg(not(unix))]
fn shell_could_not_find(_status: &ExitStatus) -> bool {
    false
}

fn write_draft(file: &mut NamedTempFile, message: &str) -> Result<(), EditorError> {
    file.write_all(message.as_bytes())
        .and_then(|_| file.flush())
        .map_err(EditorError::TempFile)
}

#[cfg(all(test, unix))]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    /// Write a shell script and return an editor command that runs it.
    ///
    /// Run through `sh` rather than exec'd directly to dodge ETXTBSY when
    /// tests write and launch scripts concurrently.
    pub fn script_editor(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, format!("{body}\n")).unwrap();
        format!("sh '{}'", path.display())
    }
}
