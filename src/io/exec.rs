//! External command execution against the practice directory.
//!
//! Commands arrive as the shell-style strings the learner typed. They are
//! split with shell quoting rules, spawned with the practice directory as
//! cwd, and any invocation-level fault is folded into a failure result;
//! callers never see an `Err` from running a command. There is deliberately
//! no timeout: a hanging tool hangs the session.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, instrument, warn};

/// Captured outcome of one external command.
///
/// Transient: produced here, consumed immediately for feedback and branch
/// decisions, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    /// An invocation-level fault (unparsable command, spawn failure).
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.into(),
        }
    }
}

/// Whether command output is captured for feedback or streamed straight to
/// the learner's terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Capture,
    Inherit,
}

/// Seam between the tutorial engine and the external tool. Tests substitute
/// a scripted implementation; the binary uses [`ShellRunner`].
pub trait CommandRunner {
    fn run(&self, command: &str, mode: OutputMode) -> ExecutionResult;
}

/// Runs shell-style command strings in a fixed working directory.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    workdir: PathBuf,
    output_limit_bytes: usize,
}

impl ShellRunner {
    pub fn new(workdir: impl Into<PathBuf>, output_limit_bytes: usize) -> Self {
        Self {
            workdir: workdir.into(),
            output_limit_bytes,
        }
    }
}

impl CommandRunner for ShellRunner {
    #[instrument(skip_all, fields(command))]
    fn run(&self, command: &str, mode: OutputMode) -> ExecutionResult {
        let argv = match shell_words::split(command) {
            Ok(argv) => argv,
            Err(err) => {
                warn!(command, err = %err, "unparsable command");
                return ExecutionResult::fault(format!("cannot parse command: {err}"));
            }
        };
        let Some((program, args)) = argv.split_first() else {
            return ExecutionResult::fault("empty command");
        };

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.workdir);

        debug!(command, ?mode, "running external command");
        let result = match mode {
            OutputMode::Capture => match cmd.output() {
                Ok(output) => ExecutionResult {
                    success: output.status.success(),
                    stdout: bounded_lossy(&output.stdout, self.output_limit_bytes),
                    stderr: bounded_lossy(&output.stderr, self.output_limit_bytes),
                },
                Err(err) => {
                    warn!(command, err = %err, "failed to spawn command");
                    ExecutionResult::fault(err.to_string())
                }
            },
            OutputMode::Inherit => match cmd.status() {
                Ok(status) => ExecutionResult {
                    success: status.success(),
                    stdout: String::new(),
                    stderr: String::new(),
                },
                Err(err) => {
                    warn!(command, err = %err, "failed to spawn command");
                    ExecutionResult::fault(err.to_string())
                }
            },
        };
        debug!(success = result.success, "command finished");
        result
    }
}

/// Lossy-decode bytes, truncating to `limit` at a char boundary with an
/// explicit marker so runaway output cannot balloon the feedback.
fn bounded_lossy(bytes: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= limit {
        return text.into_owned();
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = text[..end].to_string();
    out.push_str("\n[output truncated]\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> (tempfile::TempDir, ShellRunner) {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = ShellRunner::new(temp.path(), 100_000);
        (temp, runner)
    }

    #[test]
    fn captures_stdout_of_a_successful_command() {
        let (_temp, runner) = runner();
        let result = runner.run("echo hello quest", OutputMode::Capture);
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello quest");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn quoted_arguments_survive_splitting() {
        let (_temp, runner) = runner();
        let result = runner.run("echo \"two words\"", OutputMode::Capture);
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "two words");
    }

    #[test]
    fn missing_binary_becomes_failure_result() {
        let (_temp, runner) = runner();
        let result = runner.run("definitely-not-a-real-tool --version", OutputMode::Capture);
        assert!(!result.success);
        assert!(result.stdout.is_empty());
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn empty_command_becomes_failure_result() {
        let (_temp, runner) = runner();
        let result = runner.run("   ", OutputMode::Capture);
        assert!(!result.success);
        assert_eq!(result.stderr, "empty command");
    }

    #[test]
    fn unbalanced_quote_becomes_failure_result() {
        let (_temp, runner) = runner();
        let result = runner.run("echo \"unterminated", OutputMode::Capture);
        assert!(!result.success);
        assert!(result.stderr.contains("cannot parse command"));
    }

    #[test]
    fn runs_in_the_configured_working_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("marker.txt"), "here").expect("write marker");
        let runner = ShellRunner::new(temp.path(), 100_000);
        let result = runner.run("ls", OutputMode::Capture);
        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn captured_output_is_bounded() {
        let text = "x".repeat(64);
        let bounded = bounded_lossy(text.as_bytes(), 16);
        assert!(bounded.starts_with(&"x".repeat(16)));
        assert!(bounded.ends_with("[output truncated]\n"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "héllo wörld".repeat(8);
        let bounded = bounded_lossy(text.as_bytes(), 10);
        assert!(bounded.contains("[output truncated]"));
    }
}
