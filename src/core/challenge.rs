//! Challenge descriptors: the static data driving one prompt/validate/execute
//! cycle.
//!
//! A challenge is pure data. The state machine that runs it lives in
//! [`crate::step`]; keeping the descriptor free of I/O lets lessons declare
//! their challenges as plain values and lets tests inspect them directly.

use crate::core::answer::{self, Classification, Rule};

/// What to execute once an answer has been accepted.
#[derive(Debug, Clone)]
pub enum Action {
    /// Execute the learner's literal input.
    RunInput,
    /// Execute a fixed command list (quiz answers mapped to canned commands).
    Run(Vec<String>),
    /// Append the learner's input to a command template
    /// (e.g. `git cherry-pick` + hash).
    RunWithInput(String),
    /// No command; the answer itself was the lesson.
    Narrate,
}

impl Action {
    pub fn run(commands: &[&str]) -> Self {
        Self::Run(commands.iter().map(ToString::to_string).collect())
    }
}

/// One acceptance tier: a rule, the points it awards, and the action it runs.
#[derive(Debug, Clone)]
pub struct Tier {
    pub rule: Rule,
    pub points: u32,
    pub action: Action,
}

/// A dependent challenge chained after an accepted answer.
///
/// When `trigger` is set, the follow-up only runs if the accepted input also
/// matches the trigger rule (e.g. the learner created a branch without
/// switching to it). `None` chains unconditionally.
#[derive(Debug, Clone)]
pub struct FollowUp {
    pub trigger: Option<Rule>,
    pub challenge: Box<Challenge>,
}

/// Static descriptor for a single prompt/validate/execute/score unit.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Text shown above the `$ ` prompt.
    pub prompt: String,
    /// The exact tier (full marks).
    pub exact: Tier,
    /// Alternative tiers, tried in order after the exact tier.
    pub alternatives: Vec<Tier>,
    /// Fallback command(s) executed on an incorrect answer so the working
    /// directory still reaches the intended state.
    pub corrected: Vec<String>,
    /// Shown alongside an incorrect answer.
    pub hint: String,
    /// Re-prompts allowed before the corrected fallback kicks in. Zero means
    /// an incorrect answer corrects immediately.
    pub retries: u32,
    pub follow_up: Option<FollowUp>,
}

impl Challenge {
    pub fn new(prompt: impl Into<String>, rule: Rule, points: u32, action: Action) -> Self {
        Self {
            prompt: prompt.into(),
            exact: Tier {
                rule,
                points,
                action,
            },
            alternatives: Vec::new(),
            corrected: Vec::new(),
            hint: String::new(),
            retries: 0,
            follow_up: None,
        }
    }

    pub fn alternative(mut self, rule: Rule, points: u32, action: Action) -> Self {
        self.alternatives.push(Tier {
            rule,
            points,
            action,
        });
        self
    }

    pub fn corrected(mut self, commands: &[&str]) -> Self {
        self.corrected = commands.iter().map(ToString::to_string).collect();
        self
    }

    pub fn hint(mut self, text: impl Into<String>) -> Self {
        self.hint = text.into();
        self
    }

    pub fn retries(mut self, count: u32) -> Self {
        self.retries = count;
        self
    }

    pub fn follow_up(mut self, trigger: Option<Rule>, challenge: Challenge) -> Self {
        self.follow_up = Some(FollowUp {
            trigger,
            challenge: Box::new(challenge),
        });
        self
    }

    /// Classify learner input against this challenge's tiers.
    pub fn classify(&self, input: &str) -> Classification {
        answer::classify(
            input,
            &self.exact.rule,
            self.alternatives.iter().map(|tier| &tier.rule),
        )
    }

    /// The tier that matched, if the classification accepted the answer.
    pub fn tier(&self, classification: Classification) -> Option<&Tier> {
        match classification {
            Classification::Exact => Some(&self.exact),
            Classification::Alternative(index) => self.alternatives.get(index),
            Classification::Incorrect => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_quiz() -> Challenge {
        Challenge::new(
            "Which command removes the last commit but keeps your files?",
            Rule::exact("a"),
            30,
            Action::run(&["git reset --soft HEAD~1"]),
        )
        .alternative(Rule::exact("c"), 25, Action::run(&["git reset HEAD~1"]))
        .corrected(&["git reset --soft HEAD~1"])
        .hint("--hard would delete your changes; --soft keeps them staged.")
    }

    #[test]
    fn classify_picks_matching_tier() {
        let quiz = reset_quiz();
        assert_eq!(quiz.classify("a"), Classification::Exact);
        assert_eq!(quiz.classify("c"), Classification::Alternative(0));
        assert_eq!(quiz.classify("b"), Classification::Incorrect);
    }

    #[test]
    fn tier_lookup_follows_classification() {
        let quiz = reset_quiz();
        let exact = quiz.tier(Classification::Exact).expect("exact tier");
        assert_eq!(exact.points, 30);
        let alt = quiz
            .tier(Classification::Alternative(0))
            .expect("alternative tier");
        assert_eq!(alt.points, 25);
        assert!(quiz.tier(Classification::Incorrect).is_none());
    }

    #[test]
    fn builder_defaults_are_inert() {
        let plain = Challenge::new("p", Rule::exact("x"), 5, Action::Narrate);
        assert!(plain.corrected.is_empty());
        assert!(plain.follow_up.is_none());
        assert_eq!(plain.retries, 0);
    }
}
