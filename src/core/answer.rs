//! Deterministic classification of learner answers.
//!
//! Acceptance rules are composed per challenge. Classification is a pure
//! function of the input text and the rules, so it can be tested without any
//! terminal or process I/O.

use regex::Regex;

/// A single acceptance rule primitive.
///
/// Challenges combine one exact-tier rule with any number of alternative-tier
/// rules. `Pattern` covers free-form answers (e.g. a commit hash) that no
/// finite whitelist can express.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Equality after trimming.
    Exact(String),
    /// Membership in a whitelist of phrasings.
    OneOf(Vec<String>),
    /// The input starts with the given text.
    Prefix(String),
    /// The input contains the given text anywhere.
    Contains(String),
    /// The input matches a regular expression.
    Pattern(Regex),
}

impl Rule {
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(options.into_iter().map(Into::into).collect())
    }

    pub fn prefix(text: impl Into<String>) -> Self {
        Self::Prefix(text.into())
    }

    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    /// True when the (already trimmed) input satisfies this rule.
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Exact(text) => input == text,
            Self::OneOf(options) => options.iter().any(|option| option == input),
            Self::Prefix(text) => input.starts_with(text.as_str()),
            Self::Contains(text) => input.contains(text.as_str()),
            Self::Pattern(re) => re.is_match(input),
        }
    }
}

/// Outcome of classifying one answer.
///
/// `Alternative` carries the index of the matching alternative rule so the
/// caller can look up that tier's points and action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Exact,
    Alternative(usize),
    Incorrect,
}

/// Classify raw learner input against an exact rule and alternative rules.
///
/// Input is trimmed once up front. The exact rule wins over alternatives;
/// among alternatives the first match wins.
pub fn classify<'a, I>(input: &str, exact: &Rule, alternatives: I) -> Classification
where
    I: IntoIterator<Item = &'a Rule>,
{
    let input = input.trim();
    if exact.matches(input) {
        return Classification::Exact;
    }
    for (index, rule) in alternatives.into_iter().enumerate() {
        if rule.matches(input) {
            return Classification::Alternative(index);
        }
    }
    Classification::Incorrect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_after_trimming() {
        let exact = Rule::exact("git init");
        assert_eq!(classify("  git init  ", &exact, []), Classification::Exact);
    }

    #[test]
    fn exact_rule_wins_over_alternatives() {
        let exact = Rule::exact("git init");
        let alts = [Rule::contains("init")];
        assert_eq!(classify("git init", &exact, &alts), Classification::Exact);
    }

    #[test]
    fn contains_token_accepts_both_phrasings_as_alternative() {
        let exact = Rule::exact("no such answer");
        let alts = [Rule::contains("add")];
        assert_eq!(
            classify("git add README.md", &exact, &alts),
            Classification::Alternative(0)
        );
        assert_eq!(
            classify("git add .", &exact, &alts),
            Classification::Alternative(0)
        );
    }

    #[test]
    fn prefix_rule_accepts_any_message() {
        let exact = Rule::prefix("git commit -m");
        assert_eq!(
            classify("git commit -m \"first commit\"", &exact, []),
            Classification::Exact
        );
        assert_eq!(classify("git commit", &exact, []), Classification::Incorrect);
    }

    #[test]
    fn one_of_whitelist() {
        let exact = Rule::one_of(["git checkout -b feature", "git switch -c feature"]);
        assert_eq!(
            classify("git switch -c feature", &exact, []),
            Classification::Exact
        );
        assert_eq!(
            classify("git branch feature", &exact, []),
            Classification::Incorrect
        );
    }

    #[test]
    fn pattern_rule_matches_commit_hash() {
        let re = Regex::new("^[0-9a-f]{4,40}$").expect("pattern");
        let exact = Rule::Pattern(re);
        assert_eq!(classify("a1b2c3d", &exact, []), Classification::Exact);
        assert_eq!(classify("not-a-hash", &exact, []), Classification::Incorrect);
    }

    #[test]
    fn first_matching_alternative_wins() {
        let exact = Rule::exact("a");
        let alts = [Rule::contains("reset"), Rule::contains("git")];
        assert_eq!(
            classify("git reset HEAD~1", &exact, &alts),
            Classification::Alternative(0)
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let exact = Rule::exact("git status");
        let alts = [Rule::contains("status")];
        let first = classify("git status --short", &exact, &alts);
        let second = classify("git status --short", &exact, &alts);
        assert_eq!(first, second);
    }

    #[test]
    fn unmatched_input_is_incorrect() {
        let exact = Rule::exact("git reset --soft HEAD~1");
        assert_eq!(
            classify("git reset --hard HEAD~1", &exact, []),
            Classification::Incorrect
        );
    }
}
