//! The emergency-recovery menu and its scenarios.
//!
//! Each scenario is self-contained: it scripts its own precondition into the
//! working directory, runs one or more challenge steps, and returns to the
//! menu. Dispatch is a single exhaustive match over [`ScenarioId`], so adding
//! a menu entry without a handler fails to compile.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::core::answer::Rule;
use crate::core::challenge::{Action, Challenge};
use crate::core::menu::ScenarioId;
use crate::core::session::{ScoreTier, Session};
use crate::io::console::Console;
use crate::io::exec::{CommandRunner, OutputMode};
use crate::io::fixtures;
use crate::step::{Flow, run_step};

/// Show the menu until the learner finishes or quits. Invalid selections
/// silently redisplay; they never score, and never run a command.
pub fn run_menu<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<()>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    loop {
        print_menu();
        let Some(choice) = console.read_line("Choose (1-8): ")? else {
            return Ok(());
        };
        let Some(id) = ScenarioId::parse(&choice) else {
            debug!(choice, "invalid menu selection");
            continue;
        };
        match run_scenario(id, session, console, runner)? {
            Flow::Continue => {}
            Flow::Quit => return Ok(()),
        }
    }
}

fn print_menu() {
    println!("\n🚨 EMERGENCY AND RECOVERY SCENARIOS");
    println!("Pick a scenario to learn from:\n");
    for id in ScenarioId::ALL {
        println!("{}. {}", id.number(), id.label());
    }
}

fn run_scenario<C, R>(
    id: ScenarioId,
    session: &mut Session,
    console: &mut C,
    runner: &R,
) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    match id {
        ScenarioId::WrongBranch => wrong_branch(session, console, runner),
        ScenarioId::WrongPush => wrong_push(session, console, runner),
        ScenarioId::DeletedFiles => deleted_files(session, console, runner),
        ScenarioId::TotalDisaster => total_disaster(session, console, runner),
        ScenarioId::UndoCommit => undo_commit(session, console, runner),
        ScenarioId::CherryPick => cherry_pick(session, console, runner),
        ScenarioId::DangerousCommands => dangerous_commands(session, console),
        ScenarioId::Finish => Ok(finish(session)),
    }
}

/// A commit landed on main that belonged on feature.
fn wrong_branch<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n😱 SCENARIO: COMMIT ON THE WRONG BRANCH");
    println!(
        "You were on main, changed some files, committed... and then realized\n\
         the commit belonged on 'feature'. Let's reproduce that:"
    );
    runner.run("git checkout main", OutputMode::Capture);
    fixtures::write_file(
        session.workdir(),
        "wrong_commit.txt",
        "This commit belonged on the feature branch!\n",
    )?;
    runner.run("git add wrong_commit.txt", OutputMode::Capture);
    runner.run(
        "git commit -m \"Wrong commit - belonged on feature\"",
        OutputMode::Capture,
    );

    let reset_quiz = Challenge::new(
        "🔧 Which command removes the last commit but keeps your files?\n\
         a) git reset --soft HEAD~1\n\
         b) git reset --hard HEAD~1\n\
         c) git reset HEAD~1\n\
         Answer with a, b or c.",
        Rule::exact("a"),
        30,
        Action::run(&["git reset --soft HEAD~1"]),
    )
    .alternative(Rule::exact("c"), 25, Action::run(&["git reset HEAD~1"]))
    .corrected(&["git reset --soft HEAD~1"])
    .hint("--hard would delete your changes too! Using --soft to be safe.");
    if run_step(session, &reset_quiz, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    let recommit = Challenge::new(
        "Now redo the commit on the right branch:",
        Rule::contains("git commit"),
        20,
        Action::RunInput,
    )
    .corrected(&["git commit -m \"Commit on the right branch\""])
    .hint("A plain git commit -m \"...\" finishes the rescue.");
    let switch = Challenge::new(
        "Your files are back. Switch to the branch the commit belonged on:",
        Rule::one_of(["git checkout feature", "git switch feature"]),
        0,
        Action::RunInput,
    )
    .alternative(Rule::contains("feature"), 0, Action::run(&["git checkout feature"]))
    .corrected(&[
        "git checkout feature",
        "git commit -m \"Commit on the right branch\"",
    ])
    .hint("git checkout feature (or git switch feature).")
    .follow_up(None, recommit);
    if run_step(session, &switch, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!(
        "\n📚 WHAT YOU LEARNED:\n\
         • git reset --soft: drops the commit, keeps files staged\n\
         • git reset: drops the commit, keeps files unstaged\n\
         • git reset --hard: DANGEROUS - deletes everything\n\
         • Always check the branch before committing!"
    );
    pause(console)
}

/// Pushed something that should never have left the machine. Pure quiz.
fn wrong_push<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n🔥 SCENARIO: I PUSHED SOMETHING I SHOULDN'T HAVE!");
    println!(
        "Credentials, temp files, unfinished code... If you pushed CREDENTIALS,\n\
         rotate them FIRST: git keeps history, so removing the file later does\n\
         not un-leak the secret.\n\n\
         Recovery plan: 1) rotate compromised credentials, 2) remove the bad\n\
         commit, 3) rewrite the remote history (--force-with-lease, never plain\n\
         --force on shared branches), 4) tell the team."
    );

    let quiz = Challenge::new(
        "QUIZ: You pushed a password in the last commit. What do you do?\n\
         a) git reset HEAD~1 && git push --force\n\
         b) change the password, then git revert\n\
         c) change the password first, then reset and force push\n\
         d) ignore it, nobody will notice\n\
         Answer with a, b, c or d.",
        Rule::exact("c"),
        40,
        Action::Narrate,
    )
    .alternative(Rule::exact("b"), 30, Action::Narrate)
    .alternative(Rule::exact("a"), 10, Action::Narrate)
    .hint("Never ignore a security problem! Safety first: rotate, then clean up.");
    if run_step(session, &quiz, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!(
        "\n📚 RECOVERY TOOLBOX:\n\
         • git log --oneline          recent commits\n\
         • git show <commit>          what a commit contains\n\
         • git revert <commit>        undo via a new commit\n\
         • git reflog                 everything you did (lifesaver!)\n\
         • git push --force-with-lease  safer forced push"
    );
    pause(console)
}

/// An important committed file vanished from the working tree.
fn deleted_files<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n💀 SCENARIO: I DELETED IMPORTANT FILES!");
    println!("Let's simulate it. I'm committing important_file.txt, then deleting it.");
    fixtures::write_file(
        session.workdir(),
        "important_file.txt",
        "A very important file that should not have been deleted!\n",
    )?;
    runner.run("git add important_file.txt", OutputMode::Capture);
    runner.run("git commit -m \"Add important file\"", OutputMode::Capture);
    fixtures::remove_file(session.workdir(), "important_file.txt")?;

    println!("\n😱 important_file.txt is gone! First, diagnose:");
    let status = runner.run("git status", OutputMode::Capture);
    if !status.stdout.trim().is_empty() {
        println!("{}", status.stdout.trim_end());
    }

    println!(
        "\n🛠️ A file deleted only from the working tree is restored with\n\
         git checkout -- <file> (from the index or the last commit)."
    );
    let restore = Challenge::new(
        "Which command restores important_file.txt?",
        Rule::Pattern(
            Regex::new(r"^git checkout\b.*\bimportant_file\.txt$").context("restore pattern")?,
        ),
        35,
        Action::RunInput,
    )
    .corrected(&["git checkout -- important_file.txt"])
    .hint("The command is: git checkout -- important_file.txt.");
    if run_step(session, &restore, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }
    if !session.workdir().join("important_file.txt").exists() {
        println!("Still missing - restoring it the standard way:");
        runner.run("git checkout -- important_file.txt", OutputMode::Capture);
    }

    println!(
        "\n🎓 ADVANCED: THE REFLOG (your lifesaver)\n\
         git reflog records everything you did, even \"lost\" commits:\n\
         after a bad reset --hard, a deleted branch, or a broken rebase,\n\
         find a good entry and git checkout <hash> to get back."
    );
    let reflog = runner.run("git reflog", OutputMode::Capture);
    if !reflog.stdout.trim().is_empty() {
        println!("{}", reflog.stdout.trim_end());
    }
    pause(console)
}

/// Everything is broken at once: stop, diagnose, back up, recover.
fn total_disaster<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n🌪️ SCENARIO: MY REPOSITORY IS A TOTAL DISASTER!");
    println!(
        "Tangled branches, conflicts everywhere, a merge abandoned halfway.\n\n\
         EMERGENCY PROTOCOL:\n\
         1. STOP - no more git commands you don't understand\n\
         2. DIAGNOSE - git status, git branch, git log --oneline, git reflog\n\
         3. BACK UP - save what you can\n\
         4. RESET to the last known-good state from the reflog"
    );

    println!("\n🔍 Diagnosis of the current repository:");
    let status = runner.run("git status", OutputMode::Capture);
    if !status.stdout.trim().is_empty() {
        println!("{}", status.stdout.trim_end());
    }
    let branches = runner.run("git branch", OutputMode::Capture);
    if !branches.stdout.trim().is_empty() {
        println!("{}", branches.stdout.trim_end());
    }

    let backup = Challenge::new(
        "💾 Which command backs up your current state before any recovery?",
        Rule::contains("git stash"),
        20,
        Action::run(&["git stash", "git branch emergency-backup"]),
    )
    .alternative(
        Rule::contains("git branch"),
        20,
        Action::run(&["git stash", "git branch emergency-backup"]),
    )
    .corrected(&["git stash", "git branch emergency-backup"])
    .hint("Tip: git stash && git branch emergency-backup. Doing both for you.");
    if run_step(session, &backup, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!("\n🔄 Now look for a known-good entry to return to:");
    let reflog = runner.run("git reflog -10", OutputMode::Capture);
    if !reflog.stdout.trim().is_empty() {
        println!("{}", reflog.stdout.trim_end());
    }

    println!(
        "\n📚 PREVENTING DISASTERS:\n\
         • commit often, with clear messages\n\
         • push regularly (free backup)\n\
         • one branch = one piece of work\n\
         • git status before every risky command\n\n\
         Remember: committed work is almost impossible to lose for good."
    );
    session.award(25);
    pause(console)
}

/// Undo the last commit, four different ways.
fn undo_commit<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n⚡ SCENARIO: HOW DO I UNDO THE LAST COMMIT?");
    println!(
        "Four options, depending on what you want:\n\
         1. git reset --soft HEAD~1   drop the commit, keep files staged\n\
         2. git reset HEAD~1          drop the commit, keep files unstaged\n\
         3. git reset --hard HEAD~1   drop everything (NOT recoverable!)\n\
         4. git revert HEAD           new commit that undoes it (history kept)"
    );

    fixtures::write_file(
        session.workdir(),
        "mistake.txt",
        "This commit has a mistake in it!\n",
    )?;
    runner.run("git add mistake.txt", OutputMode::Capture);
    runner.run(
        "git commit -m \"Commit with a mistake - undo me\"",
        OutputMode::Capture,
    );

    let quiz = Challenge::new(
        "🎯 QUIZ: You just made that commit but the message is wrong, and you\n\
         want to redo it. Which command?\n\
         a) git reset --soft HEAD~1\n\
         b) git reset --hard HEAD~1\n\
         c) git revert HEAD\n\
         d) git commit --amend\n\
         Answer with a, b, c or d.",
        Rule::exact("a"),
        25,
        Action::run(&["git reset --soft HEAD~1"]),
    )
    .alternative(
        Rule::exact("d"),
        30,
        Action::run(&["git commit --amend -m \"Corrected commit message\""]),
    )
    .alternative(
        Rule::exact("c"),
        20,
        Action::run(&["git revert --no-edit HEAD"]),
    )
    .corrected(&["git reset --soft HEAD~1"])
    .hint("--hard would delete everything! Using --soft to be safe.");
    if run_step(session, &quiz, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!(
        "\n🎓 BONUS: git commit --amend\n\
         Fix the last commit's message, or add a forgotten file:\n\
         • git commit --amend -m \"new message\"\n\
         • git add forgotten.txt && git commit --amend --no-edit\n\
         Amending rewrites history - never on commits already pushed."
    );
    pause(console)
}

/// Copy selected commits from another branch.
fn cherry_pick<C, R>(session: &mut Session, console: &mut C, runner: &R) -> Result<Flow>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    println!("\n🎯 SCENARIO: I ONLY WANT SOME CHANGES FROM ANOTHER BRANCH");
    println!(
        "The 'experimental' branch will get three commits; you want just one\n\
         of them on main. cherry-pick copies individual commits. Setting up:"
    );
    runner.run("git checkout -b experimental", OutputMode::Capture);
    for index in 0..3 {
        let name = format!("feature_{index}.txt");
        fixtures::write_file(session.workdir(), &name, &format!("Feature number {index}\n"))?;
        runner.run(&format!("git add {name}"), OutputMode::Capture);
        runner.run(
            &format!("git commit -m \"Add feature {index}\""),
            OutputMode::Capture,
        );
    }
    runner.run("git checkout main", OutputMode::Capture);

    println!("\nCommits on experimental:");
    let log = runner.run("git log --oneline experimental -3", OutputMode::Capture);
    if !log.stdout.trim().is_empty() {
        println!("{}", log.stdout.trim_end());
    }

    let pick = Challenge::new(
        "🎯 CHALLENGE: you want the \"Add feature 1\" commit on main.\n\
         Paste the hash to cherry-pick (I'll run git cherry-pick <hash>):",
        Rule::Pattern(Regex::new(r"^[0-9a-f]{4,40}$").context("hash pattern")?),
        30,
        Action::RunWithInput("git cherry-pick".to_string()),
    )
    .corrected(&["git cherry-pick experimental~1"])
    .hint("That doesn't look like a commit hash. Picking \"Add feature 1\" by ref instead.");
    if run_step(session, &pick, console, runner)?.is_none() {
        return Ok(Flow::Quit);
    }

    println!(
        "\n📚 CHERRY-PICK, FURTHER:\n\
         • git cherry-pick <h1> <h2>      several commits\n\
         • git cherry-pick <h1>..<h2>     a range\n\
         • git cherry-pick --no-commit    apply without committing\n\
         • git cherry-pick --abort        bail out of a conflicted pick"
    );
    pause(console)
}

/// The commands that can ruin your week, and their safe alternatives.
fn dangerous_commands<C>(session: &mut Session, console: &mut C) -> Result<Flow>
where
    C: Console + ?Sized,
{
    println!("\n⚠️ DANGEROUS COMMANDS THAT CAN RUIN YOUR WEEK");
    println!(
        "💀 DEADLY:\n\
         • git reset --hard      deletes uncommitted work, no way back\n\
         • git push --force      overwrites shared history\n\
         • git rebase -i         rewrites history; easy to lose commits\n\
         • git branch -D         force-deletes a branch, merged or not\n\n\
         ⚡ VERY RISKY:\n\
         • git clean -fd         deletes all untracked files and directories\n\
         • git checkout -- .     discards every uncommitted change"
    );
    println!(
        "\n🛡️ SAFER ALTERNATIVES:\n\
         • instead of reset --hard: git stash, or checkout -- <one file>\n\
         • instead of push --force: git push --force-with-lease, or git revert\n\
         • instead of branch -D:    git branch -d (refuses unmerged work)\n\n\
         💡 GOLDEN RULE before any destructive command:\n\
         back up (stash or a backup branch), check (status, diff, log),\n\
         and ask: \"can I recover if this goes wrong?\""
    );
    session.award(50);
    pause(console)
}

/// Terminal menu choice: final summary and score tier.
fn finish(session: &Session) -> Flow {
    let tier = ScoreTier::from_score(session.score());
    println!("\n🏆 CONGRATULATIONS! YOU FINISHED GIT QUEST! 🏆");
    println!("\nFINAL SCORE: {}", session.score());
    println!(
        "\nYou practiced:\n\
         ✅ the basic commands (init, add, commit, status)\n\
         ✅ branching and merging\n\
         ✅ conflict resolution\n\
         ✅ emergency and recovery scenarios\n\
         ✅ the dangerous commands to avoid"
    );
    println!("\n🏅 RANK ACHIEVED: {}", tier.describe());
    println!(
        "\nNext steps: practice a branching workflow, learn tags and bisect,\n\
         set up hooks, read the Pro Git book, contribute to open source.\n\n\
         Want to play again? Just relaunch. Thanks for playing! 🚀"
    );
    Flow::Quit
}

fn pause<C>(console: &mut C) -> Result<Flow>
where
    C: Console + ?Sized,
{
    if console.pause("\nPress ENTER to return to the menu...")? {
        Ok(Flow::Continue)
    } else {
        Ok(Flow::Quit)
    }
}
