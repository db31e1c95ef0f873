//! Mutable tutorial session state.
//!
//! The session is created once at startup and passed by mutable reference
//! into every lesson and scenario; there is no ambient global state. Score
//! and level are private so the monotonic invariants hold by construction.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Process-lifetime tutorial state: current level, running score, and the
/// working directory every external command operates on. Never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    level: u32,
    score: u32,
    workdir: PathBuf,
}

impl Session {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            level: 1,
            score: 0,
            workdir: workdir.into(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Add points. The score only ever increases.
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        debug!(points, score = self.score, "points awarded");
    }

    /// Advance to a lesson level. Levels never move backwards.
    pub fn enter_level(&mut self, level: u32) {
        self.level = self.level.max(level);
        debug!(level = self.level, "level entered");
    }
}

/// Final ranking derived from the score when the learner finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Beginner,
    Intermediate,
    Expert,
    Master,
}

impl ScoreTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            200.. => Self::Master,
            150.. => Self::Expert,
            100.. => Self::Intermediate,
            _ => Self::Beginner,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Master => "GIT MASTER - ready for any challenge!",
            Self::Expert => "GIT EXPERT - strong skills, keep going!",
            Self::Intermediate => "GIT INTERMEDIATE - good basics, keep practicing!",
            Self::Beginner => "GIT BEGINNER - revisit the fundamentals!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_only_increases() {
        let mut session = Session::new("/tmp/practice");
        session.award(10);
        session.award(0);
        session.award(25);
        assert_eq!(session.score(), 35);
    }

    #[test]
    fn award_saturates_instead_of_overflowing() {
        let mut session = Session::new("/tmp/practice");
        session.award(u32::MAX);
        session.award(50);
        assert_eq!(session.score(), u32::MAX);
    }

    #[test]
    fn level_never_moves_backwards() {
        let mut session = Session::new("/tmp/practice");
        session.enter_level(2);
        session.enter_level(1);
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ScoreTier::from_score(0), ScoreTier::Beginner);
        assert_eq!(ScoreTier::from_score(99), ScoreTier::Beginner);
        assert_eq!(ScoreTier::from_score(100), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::from_score(149), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::from_score(150), ScoreTier::Expert);
        assert_eq!(ScoreTier::from_score(200), ScoreTier::Master);
        assert_eq!(ScoreTier::from_score(400), ScoreTier::Master);
    }
}
