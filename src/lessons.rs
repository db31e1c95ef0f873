//! The two core lessons, chained in fixed order.
//!
//! Order encodes pedagogy: a repository must exist before staging, staging
//! before committing, two diverging branches before a conflict. Lessons
//! thread the session through every step and end with a score recap and an
//! acknowledgment before the level advances.

use anyhow::Result;

use crate::config::QuestConfig;
use crate::core::answer::Rule;
use crate::core::challenge::{Action, Challenge};
use crate::core::session::Session;
use crate::io::console::Console;
use crate::io::exec::{CommandRunner, OutputMode};
use crate::io::fixtures;
use crate::step::{Flow, run_step};

/// Run the welcome plus both lessons. `Flow::Quit` means the learner left.
pub fn run_course<C, R>(
    session: &mut Session,
    console: &mut C,
    runner: &R,
    config: &QuestConfig,
) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    banner(session);
    println!(
        "\nWelcome! This is a hands-on tutorial for learning git.\n\
         You will practice:\n\
         • the basic commands (init, add, commit, status, log)\n\
         • branching and merging\n\
         • resolving conflicts\n\
         • escaping \"catastrophic\" situations\n\n\
         Every answer you type runs against a real repository in\n\
         {}.",
        session.workdir().display()
    );
    if !console.pause("\nPress ENTER to continue...")? {
        return Ok(Flow::Quit);
    }

    if basics(session, console, runner)? == Flow::Quit {
        return Ok(Flow::Quit);
    }
    branching(session, console, runner, config)
}

/// Header showing the running level and score.
fn banner(session: &Session) {
    println!("\n==============================================");
    println!("              GIT QUEST");
    println!("   Level: {:<2}              Score: {:<6}", session.level(), session.score());
    println!("==============================================");
}

fn recap<C>(session: &Session, console: &mut C, heading: &str, ack: &str) -> Result<Flow>
where
    C: Console + ?Sized,
{
    println!("\n🎉 {heading} Score: {}", session.score());
    if console.pause(ack)? {
        Ok(Flow::Continue)
    } else {
        Ok(Flow::Quit)
    }
}

/// Level 1: init, status, add, commit.
fn basics<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    banner(session);
    println!("\n🏁 LEVEL 1: GIT FUNDAMENTALS");
    println!(
        "In this level you will learn:\n\
         • git init (create a repository)\n\
         • git status (inspect the working tree)\n\
         • git add (stage files)\n\
         • git commit (record a snapshot)"
    );
    if !console.pause("\nLet's begin! Press ENTER...")? {
        return Ok(Flow::Quit);
    }

    let quiz = Challenge::new(
        "📚 QUIZ: How do you initialize a new git repository?\n\
         a) git start\n\
         b) git init\n\
         c) git begin\n\
         Answer with a, b or c.",
        Rule::exact("b"),
        10,
        Action::Narrate,
    )
    .hint("The right answer is 'b' - git init creates a new repository.");
    if run_step(session, &quiz, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    let init = Challenge::new(
        "🛠️ PRACTICE: type the command that initializes the repository:",
        Rule::exact("git init"),
        20,
        Action::RunInput,
    )
    .corrected(&["git init"])
    .hint("The correct command is: git init. Running it for you.");
    if run_step(session, &init, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    fixtures::write_file(session.workdir(), fixtures::README, fixtures::README_INITIAL)?;
    println!("\n📝 I created README.md for you. Let's look at the repository state.");

    let status = Challenge::new(
        "📚 Which command shows the state of the repository?",
        Rule::exact("git status"),
        15,
        Action::RunInput,
    )
    .corrected(&["git status"])
    .hint("The correct command is: git status.");
    if run_step(session, &status, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    let add = Challenge::new(
        "📚 Now stage README.md:",
        Rule::one_of(["git add README.md", "git add ."]),
        15,
        Action::RunInput,
    )
    .alternative(Rule::contains("git add"), 10, Action::RunInput)
    .corrected(&["git add README.md"])
    .hint("The correct command is: git add README.md (or git add .).");
    if run_step(session, &add, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    let commit = Challenge::new(
        "📚 Commit it! Use a descriptive message:",
        Rule::prefix("git commit -m"),
        25,
        Action::RunInput,
    )
    .corrected(&["git commit -m \"First commit: add README\""])
    .hint("The correct form is: git commit -m \"your message\".");
    if run_step(session, &commit, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    recap(
        session,
        console,
        "LEVEL 1 COMPLETE!",
        "Ready for Level 2? (branching and merging)",
    )
}

/// Level 2: branches, diverging edits, and a guided merge conflict.
fn branching<C, R>(
    session: &mut Session,
    console: &mut C,
    runner: &R,
    config: &QuestConfig,
) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    session.enter_level(2);
    banner(session);
    println!("\n🌳 LEVEL 2: BRANCHING AND YOUR FIRST CONFLICT");
    println!(
        "In this level you will learn:\n\
         • git branch / git switch / git checkout\n\
         • git merge\n\
         • resolving a simple conflict"
    );
    if !console.pause("\nPress ENTER to continue...")? {
        return Ok(Flow::Quit);
    }

    let activate = Challenge::new(
        "✅ Branch created. Now switch to it:",
        Rule::one_of(["git checkout feature", "git switch feature"]),
        0,
        Action::RunInput,
    )
    .corrected(&["git checkout feature"])
    .hint("Use: git checkout feature or git switch feature.")
    .retries(config.max_prompt_retries);
    let branch = Challenge::new(
        "📚 QUIZ: Create a new branch called 'feature'.",
        Rule::one_of(["git checkout -b feature", "git switch -c feature"]),
        20,
        Action::RunInput,
    )
    .alternative(Rule::exact("git branch feature"), 20, Action::RunInput)
    .corrected(&["git checkout -b feature"])
    .hint("Correct forms: git branch feature, git checkout -b feature, git switch -c feature.")
    .follow_up(Some(Rule::exact("git branch feature")), activate);
    if run_step(session, &branch, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    fixtures::write_file(session.workdir(), fixtures::README, fixtures::README_FEATURE)?;
    println!("\n📝 I changed README.md on the 'feature' branch.");

    let commit_feature = Challenge::new(
        "Now commit:",
        Rule::contains("git commit"),
        15,
        Action::RunInput,
    )
    .corrected(&["git commit -m \"Add feature section\""])
    .hint("You need git commit after staging.");
    let stage_feature = Challenge::new(
        "Stage the change:",
        Rule::contains("git add"),
        0,
        Action::RunInput,
    )
    .corrected(&[
        "git add README.md",
        "git commit -m \"Add feature section\"",
    ])
    .hint("You need git add first, then git commit. Doing both for you.")
    .follow_up(None, commit_feature);
    if run_step(session, &stage_feature, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!("\n⚠️ NOW LET'S CREATE A CONFLICT! ⚠️");
    let back_to_main = Challenge::new(
        "Go back to the main branch:",
        Rule::exact("git checkout main"),
        0,
        Action::RunInput,
    )
    .alternative(Rule::contains("main"), 0, Action::RunInput)
    .alternative(Rule::contains("master"), 0, Action::RunInput)
    .corrected(&["git checkout main"])
    .hint("Use: git checkout main (or git switch main).");
    if run_step(session, &back_to_main, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!("\n💥 I'm editing the same lines of README.md here on main...");
    fixtures::write_file(session.workdir(), fixtures::README, fixtures::README_MAIN)?;
    runner.run("git add README.md", OutputMode::Capture);
    runner.run("git commit -m \"Update on main\"", OutputMode::Capture);
    println!("✅ Two branches now change the same lines. That means a conflict.");
    if !console.pause("Ready to learn how conflicts are resolved?")? {
        return Ok(Flow::Quit);
    }

    let merge = Challenge::new(
        "💥 Try to merge the feature branch:",
        Rule::contains("git merge feature"),
        0,
        Action::RunInput,
    )
    .corrected(&["git merge feature"])
    .hint("The command is: git merge feature.");
    if run_step(session, &merge, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    if let Ok(contents) = fixtures::read_file(session.workdir(), fixtures::README) {
        println!("\n📖 README.md now contains:\n{contents}");
    }
    println!(
        "🎓 CONFLICT MARKERS:\n\
         <<<<<<< HEAD      the current branch's version\n\
         =======           separator\n\
         >>>>>>> feature   the incoming version\n\n\
         To resolve: edit the file, remove the markers, keep what you want,\n\
         then git add the file and git commit to finish the merge."
    );
    if !console.pause("Now let's resolve it together!")? {
        return Ok(Flow::Quit);
    }

    // Re-create the conflict content so the walkthrough is deterministic even
    // if the merge above resolved cleanly.
    fixtures::write_file(session.workdir(), fixtures::README, fixtures::README_CONFLICT)?;
    println!(
        "\n🔧 GUIDED RESOLUTION. How do you want to resolve README.md?\n\
         1. Keep only main's version\n\
         2. Keep only feature's version\n\
         3. Keep both sections\n\
         4. Write something completely new"
    );
    let Some(choice) = console.read_line("Choice (1/2/3/4): ")? else {
        return Ok(Flow::Quit);
    };
    fixtures::write_file(
        session.workdir(),
        fixtures::README,
        fixtures::resolved_readme(&choice),
    )?;
    println!("✅ Conflict resolved in the file. Finish the merge yourself:");

    let commit_merge = Challenge::new(
        "And complete the merge with a commit:",
        Rule::contains("git commit"),
        50,
        Action::RunInput,
    )
    .corrected(&["git commit -m \"Merge feature and resolve conflict\""])
    .hint("git commit completes the merge.");
    let stage_merge = Challenge::new(
        "Stage the resolved file:",
        Rule::contains("git add"),
        0,
        Action::RunInput,
    )
    .corrected(&[
        "git add README.md",
        "git commit -m \"Merge feature and resolve conflict\"",
    ])
    .hint("First git add the resolved file, then git commit. Doing both for you.")
    .follow_up(None, commit_merge);
    if run_step(session, &stage_merge, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    recap(
        session,
        console,
        "LEVEL 2 COMPLETE!",
        "Ready for the emergency and recovery scenarios?",
    )
}
