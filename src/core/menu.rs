//! Scenario menu identifiers.
//!
//! The recovery menu dispatches through this enum with one exhaustive match
//! rather than a lookup table of function references, so a missing arm is a
//! compile error.

/// One selectable entry in the recovery-scenario menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    WrongBranch,
    WrongPush,
    DeletedFiles,
    TotalDisaster,
    UndoCommit,
    CherryPick,
    DangerousCommands,
    Finish,
}

impl ScenarioId {
    /// Menu order. Rendering and parsing both derive from this list.
    pub const ALL: [Self; 8] = [
        Self::WrongBranch,
        Self::WrongPush,
        Self::DeletedFiles,
        Self::TotalDisaster,
        Self::UndoCommit,
        Self::CherryPick,
        Self::DangerousCommands,
        Self::Finish,
    ];

    /// Parse a menu selection. Anything outside `1`-`8` is `None`; the menu
    /// silently redisplays without scoring or running anything.
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        (1..=Self::ALL.len()).contains(&index).then(|| Self::ALL[index - 1])
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .map_or(0, |index| index + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WrongBranch => "\"Help! I committed to the wrong branch!\"",
            Self::WrongPush => "\"I pushed something I shouldn't have!\"",
            Self::DeletedFiles => "\"I deleted important files!\"",
            Self::TotalDisaster => "\"My repository is a total disaster!\"",
            Self::UndoCommit => "\"How do I undo the last commit?\"",
            Self::CherryPick => "\"I only want some changes from another branch\"",
            Self::DangerousCommands => "Review the dangerous commands to avoid",
            Self::Finish => "Finish the game",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_number() {
        for (index, id) in ScenarioId::ALL.iter().enumerate() {
            let input = (index + 1).to_string();
            assert_eq!(ScenarioId::parse(&input), Some(*id));
        }
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        assert_eq!(ScenarioId::parse("9"), None);
        assert_eq!(ScenarioId::parse("0"), None);
    }

    #[test]
    fn garbage_selection_is_rejected() {
        assert_eq!(ScenarioId::parse(""), None);
        assert_eq!(ScenarioId::parse("abc"), None);
        assert_eq!(ScenarioId::parse("1.5"), None);
        assert_eq!(ScenarioId::parse("-1"), None);
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        assert_eq!(ScenarioId::parse(" 8 "), Some(ScenarioId::Finish));
    }

    #[test]
    fn numbers_round_trip() {
        for id in ScenarioId::ALL {
            assert_eq!(ScenarioId::parse(&id.number().to_string()), Some(id));
        }
    }
}
