use crate::error::GitError;
use std::process::Command as GitCommand;

/// The version-control operations the commit flow depends on.
pub trait VersionControl {
    /// Full staged diff (`git diff --cached`).
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Staged paths, in git's order.
    fn staged_files(&self) -> Result<Vec<String>, GitError>;

    /// The editor git would use for commit messages.
    fn preferred_editor(&self) -> Result<String, GitError>;

    /// Create the commit.
    fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// `VersionControl` backed by the `git` executable on `PATH`.
#[derive(Debug, Default)]
pub struct GitCli;

impl VersionControl for GitCli {
    fn staged_diff(&self) -> Result<String, GitError> {
        git_output(&["diff", "--cached"])
    }

    fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let output = git_output(&["diff", "--cached", "--name-only"])?;
        Ok(parse_file_list(&output))
    }

    fn preferred_editor(&self) -> Result<String, GitError> {
        let args = ["var", "GIT_EDITOR"];
        let editor = git_output(&args)?.trim().to_string();
        if editor.is_empty() {
            return Err(GitError::NoEditor {
                args: args.join(" "),
            });
        }
        Ok(editor)
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        // Inherit stdio so hook output and git's summary reach the user.
        let args = ["commit", "-m", message];
        let status = GitCommand::new("git")
            .args(args)
            .status()
            .map_err(|source| GitError::Spawn {
                args: "commit".to_string(),
                source,
            })?;

        if !status.success() {
            return Err(GitError::Failed {
                args: "commit".to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Run a git command and capture stdout as String.
fn git_output(args: &[&str]) -> Result<String, GitError> {
    log::debug!("Running git {}", args.join(" "));

    let output = GitCommand::new("git")
        .args(args)
        .output()
        .map_err(|source| GitError::Spawn {
            args: args.join(" "),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::warn!("git {}: {}", args.join(" "), stderr.trim());
        }
        return Err(GitError::Failed {
            args: args.join(" "),
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn parse_file_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
