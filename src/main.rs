//! Binary entry point: parse flags, check preconditions, run the tutorial.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use gitquest::config::load_config;
use gitquest::core::session::Session;
use gitquest::io::console::LineConsole;
use gitquest::io::exec::ShellRunner;
use gitquest::step::Flow;
use gitquest::{lessons, logging, scenarios};

#[derive(Parser)]
#[command(
    name = "gitquest",
    version,
    about = "Interactive terminal tutorial that teaches git through practice drills"
)]
struct Cli {
    /// Practice directory the tutorial runs git in (created if missing).
    #[arg(long, default_value = "git-practice")]
    workdir: PathBuf,

    /// Optional TOML config file.
    #[arg(long, default_value = "gitquest.toml")]
    config: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Hard precondition: no lesson can run without git on PATH.
    let git = which::which("git")
        .context("git is not installed or not on PATH - install git before starting")?;
    debug!(git = %git.display(), "found git");

    let config = load_config(&cli.config)?;
    fs::create_dir_all(&cli.workdir)
        .with_context(|| format!("create practice directory {}", cli.workdir.display()))?;
    let workdir = cli
        .workdir
        .canonicalize()
        .with_context(|| format!("resolve practice directory {}", cli.workdir.display()))?;

    let mut session = Session::new(&workdir);
    let runner = ShellRunner::new(&workdir, config.output_limit_bytes);
    let mut console = LineConsole::new()?;

    if lessons::run_course(&mut session, &mut console, &runner, &config)? == Flow::Quit {
        println!("\nLeaving early - your score so far: {}. Come back any time!", session.score());
        return Ok(());
    }
    scenarios::run_menu(&mut session, &mut console, &runner)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["gitquest"]);
        assert_eq!(cli.workdir, PathBuf::from("git-practice"));
        assert_eq!(cli.config, PathBuf::from("gitquest.toml"));
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::parse_from(["gitquest", "--workdir", "/tmp/drills", "--config", "q.toml"]);
        assert_eq!(cli.workdir, PathBuf::from("/tmp/drills"));
        assert_eq!(cli.config, PathBuf::from("q.toml"));
    }
}
