//! Terminal input behind a small seam.
//!
//! The tutorial blocks on exactly two kinds of input: a one-line answer and
//! an "press ENTER" acknowledgment. Both go through [`Console`] so lessons
//! and scenarios can run against a scripted double in tests. End-of-input and
//! Ctrl-C are reported as `None`: a quit request, not an error.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Line-based learner input.
pub trait Console {
    /// Show `prompt` and read one trimmed line. `None` means the learner
    /// closed stdin or interrupted; callers unwind to a clean exit.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Block for acknowledgment. `false` means quit.
    fn pause(&mut self, message: &str) -> Result<bool> {
        Ok(self.read_line(message)?.is_some())
    }
}

/// Readline-backed console with history.
pub struct LineConsole {
    editor: DefaultEditor,
}

impl LineConsole {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Console for LineConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                debug!("input closed, quitting");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
