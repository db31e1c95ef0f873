//! The challenge step state machine.
//!
//! One step walks Prompted → Answered → Classified → Rewarded/Corrected →
//! Completed. The single suspension point is the line read; everything after
//! it is synchronous. An incorrect answer never blocks progress: once any
//! allowed re-prompts are spent, the corrected fallback command runs so the
//! working directory still reaches the state the lesson needs.

use anyhow::Result;
use tracing::debug;

use crate::core::answer::Classification;
use crate::core::challenge::{Action, Challenge, Tier};
use crate::core::session::Session;
use crate::io::console::Console;
use crate::io::exec::{CommandRunner, ExecutionResult, OutputMode};

/// Control value threaded from prompts up to `main`: keep going, or the
/// learner asked to leave (EOF / interrupt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What one completed step produced. Consumed immediately by the caller;
/// never stored.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub classification: Classification,
    pub execution: Option<ExecutionResult>,
}

/// Run one challenge to completion. `None` means the learner quit mid-step.
pub fn run_step<C, R>(
    session: &mut Session,
    challenge: &Challenge,
    console: &mut C,
    runner: &R,
) -> Result<Option<StepOutcome>>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n{}", challenge.prompt);
    let mut retries_left = challenge.retries;

    loop {
        let Some(input) = console.read_line("$ ")? else {
            return Ok(None);
        };
        let input = input.trim();
        let classification = challenge.classify(input);
        debug!(input, ?classification, "answer classified");

        let Some(tier) = challenge.tier(classification) else {
            if retries_left > 0 {
                retries_left -= 1;
                println!("❌ {} Try again:", challenge.hint);
                continue;
            }
            println!("❌ {}", challenge.hint);
            let execution = run_commands(runner, &challenge.corrected);
            return Ok(Some(StepOutcome {
                classification: Classification::Incorrect,
                execution,
            }));
        };

        let execution = perform(&tier.action, input, runner);
        reward(session, tier, classification, execution.as_ref());

        if let Some(follow) = &challenge.follow_up {
            let triggered = follow
                .trigger
                .as_ref()
                .is_none_or(|rule| rule.matches(input));
            if triggered && run_step(session, &follow.challenge, console, runner)?.is_none() {
                return Ok(None);
            }
        }

        return Ok(Some(StepOutcome {
            classification,
            execution,
        }));
    }
}

fn perform<R>(action: &Action, input: &str, runner: &R) -> Option<ExecutionResult>
where
    R: CommandRunner + ?Sized,
{
    match action {
        Action::RunInput => Some(runner.run(input, OutputMode::Capture)),
        Action::RunWithInput(template) => {
            Some(runner.run(&format!("{template} {input}"), OutputMode::Capture))
        }
        Action::Run(commands) => run_commands(runner, commands),
        Action::Narrate => None,
    }
}

fn run_commands<R>(runner: &R, commands: &[String]) -> Option<ExecutionResult>
where
    R: CommandRunner + ?Sized,
{
    let mut last = None;
    for command in commands {
        let result = runner.run(command, OutputMode::Capture);
        if !result.success {
            print_failure(&result);
        }
        last = Some(result);
    }
    last
}

/// Award points and print feedback for an accepted answer.
///
/// Tiers that execute the learner's own command only pay out when the
/// execution succeeds; a genuine external failure (duplicate ref, merge
/// conflict) is surfaced verbatim and not retried.
fn reward(
    session: &mut Session,
    tier: &Tier,
    classification: Classification,
    execution: Option<&ExecutionResult>,
) {
    let needs_success = matches!(tier.action, Action::RunInput | Action::RunWithInput(_));
    let succeeded = execution.is_none_or(|result| result.success);

    if needs_success && !succeeded {
        if let Some(result) = execution {
            print_failure(result);
        }
        return;
    }

    let praise = match classification {
        Classification::Exact => "Correct!",
        Classification::Alternative(_) => "That works too!",
        Classification::Incorrect => return,
    };
    if tier.points > 0 {
        session.award(tier.points);
        println!("✅ {praise} (+{} points)", tier.points);
    } else {
        println!("✅ {praise}");
    }

    if let Some(result) = execution {
        if !result.stdout.trim().is_empty() {
            println!("{}", result.stdout.trim_end());
        }
        if !result.success {
            print_failure(result);
        }
    }
}

fn print_failure(result: &ExecutionResult) {
    println!("⚠ The command did not succeed:");
    if !result.stdout.trim().is_empty() {
        println!("{}", result.stdout.trim_end());
    }
    if !result.stderr.trim().is_empty() {
        println!("{}", result.stderr.trim_end());
    }
}
