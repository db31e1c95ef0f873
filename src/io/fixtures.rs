//! Narrative fixture files staged inside the practice directory.
//!
//! Lessons write specific file contents at specific points to set up the
//! story the learner works through: a README to commit, diverging edits on
//! two branches, a pre-baked merge conflict, files to lose and recover.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const README: &str = "README.md";

pub const README_INITIAL: &str = "\
# My First Git Project

This is a practice file for learning git!
";

pub const README_FEATURE: &str = "\
# My First Git Project

This is a practice file for learning git!

## New Feature
This section was added on the feature branch!
";

pub const README_MAIN: &str = "\
# My First Git Project

This is a practice file for learning git!

## Important Update
This update was made directly on the main branch!
";

/// Conflict markers exactly as git would leave them, re-created so the
/// resolution walkthrough works even if the merge resolved cleanly.
pub const README_CONFLICT: &str = "\
# My First Git Project

This is a practice file for learning git!

<<<<<<< HEAD
## Important Update
This update was made directly on the main branch!
=======
## New Feature
This section was added on the feature branch!
>>>>>>> feature
";

const README_RESOLVED_BOTH: &str = "\
# My First Git Project

This is a practice file for learning git!

## Important Update
This update was made directly on the main branch!

## New Feature
This section was added on the feature branch!
";

const README_RESOLVED_UNIFIED: &str = "\
# My First Git Project

This is a practice file for learning git!

## Unified Version
The best parts of both versions, combined!
";

/// Map the learner's resolution choice to the resolved README contents.
///
/// 1 keeps main's side, 2 keeps feature's side, 3 keeps both; anything else
/// falls back to a freshly written unified section.
pub fn resolved_readme(choice: &str) -> &'static str {
    match choice.trim() {
        "1" => README_MAIN,
        "2" => README_FEATURE,
        "3" => README_RESOLVED_BOTH,
        _ => README_RESOLVED_UNIFIED,
    }
}

pub fn write_file(workdir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = workdir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
}

pub fn remove_file(workdir: &Path, name: &str) -> Result<()> {
    let path = workdir.join(name);
    fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
}

pub fn read_file(workdir: &Path, name: &str) -> Result<String> {
    let path = workdir.join(name);
    fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_choices_map_to_distinct_contents() {
        assert_eq!(resolved_readme("1"), README_MAIN);
        assert_eq!(resolved_readme("2"), README_FEATURE);
        assert!(resolved_readme("3").contains("Important Update"));
        assert!(resolved_readme("3").contains("New Feature"));
        assert!(resolved_readme("4").contains("Unified"));
        assert!(resolved_readme("nonsense").contains("Unified"));
    }

    #[test]
    fn no_resolution_contains_conflict_markers() {
        for choice in ["1", "2", "3", "4"] {
            let resolved = resolved_readme(choice);
            assert!(!resolved.contains("<<<<<<<"), "choice {choice}");
            assert!(!resolved.contains(">>>>>>>"), "choice {choice}");
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_file(temp.path(), README, README_INITIAL).expect("write");
        let contents = read_file(temp.path(), README).expect("read");
        assert_eq!(contents, README_INITIAL);
    }

    #[test]
    fn remove_missing_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = remove_file(temp.path(), "ghost.txt").unwrap_err();
        assert!(format!("{err:#}").contains("ghost.txt"));
    }
}
