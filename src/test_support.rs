//! Test-only doubles for the console and command runner seams.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::Result;

use crate::io::console::Console;
use crate::io::exec::{CommandRunner, ExecutionResult, OutputMode};

/// Console that replays scripted answers, then reports end-of-input.
pub struct ScriptedConsole {
    answers: VecDeque<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// A successful execution with the given stdout.
pub fn ok_result(stdout: &str) -> ExecutionResult {
    ExecutionResult {
        success: true,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// A failed execution with the given stderr.
pub fn failed_result(stderr: &str) -> ExecutionResult {
    ExecutionResult {
        success: false,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Runner that records every command and replays scripted results.
///
/// When the scripted results run out it keeps returning plain successes, so
/// tests only script the executions they care about.
pub struct ScriptedRunner {
    results: RefCell<VecDeque<ExecutionResult>>,
    commands: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn with_results(results: Vec<ExecutionResult>) -> Self {
        Self {
            results: RefCell::new(results.into_iter().collect()),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Every command executed so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, _mode: OutputMode) -> ExecutionResult {
        self.commands.borrow_mut().push(command.to_string());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ok_result(""))
    }
}
