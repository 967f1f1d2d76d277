//! The locked-segment replacement engine.
//!
//! Each rule is tried once, in table order, against the text as left by the
//! rules before it. A rule replaces only the first match of its pattern, and
//! only if none of the matched characters came out of an earlier
//! replacement. Text a rule inserts is locked for the rest of the pass, so
//! one rule's output can never be rewritten by a later rule.

use std::fmt;

use ropey::Rope;
use tracing::{debug, warn};

use crate::locks::LockSet;
use crate::outcome::RuleOutcome;
use crate::rule::{Rule, RuleTable};

/// Apply every rule in `rules` to `input`, at most once each.
pub fn replace(input: &str, rules: &RuleTable) -> String {
    let mut pass = Pass::new(input);
    for rule in rules {
        pass.apply(rule);
    }
    pass.finish()
}

/// The result of [`replace_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub output: String,
    /// One outcome per rule, in table order.
    pub outcomes: Vec<RuleOutcome>,
    /// Locked positions in `output` at the end of the pass.
    pub locks: LockSet,
}

/// Like [`replace`], but also report what each rule did.
pub fn replace_traced(input: &str, rules: &RuleTable) -> Replacement {
    let mut pass = Pass::new(input);
    let outcomes = rules.iter().map(|rule| pass.apply(rule)).collect();
    let locks = pass.locks().clone();
    Replacement {
        output: pass.finish(),
        outcomes,
        locks,
    }
}

/// One replacement pass in progress: the working text and its locks.
///
/// Both are created together and owned by the pass alone.
#[derive(Debug)]
pub struct Pass {
    text: Rope,
    locks: LockSet,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Pass {
    pub fn new(input: &str) -> Self {
        Self {
            text: Rope::from_str(input),
            locks: LockSet::new(),
        }
    }

    /// Try `rule` against the current text.
    pub fn apply(&mut self, rule: &Rule) -> RuleOutcome {
        let chars: Vec<char> = self.text.chars().collect();
        let Some(found) = rule.find(&chars, 0) else {
            debug!(pattern = rule.pattern(), "no match");
            return RuleOutcome::NoMatch;
        };

        if found.start > chars.len() || found.len > chars.len() - found.start {
            warn!(
                pattern = rule.pattern(),
                start = found.start,
                len = found.len,
                text_len = chars.len(),
                "match lies outside the text, ignored"
            );
            return RuleOutcome::NoMatch;
        }

        if found.is_empty() {
            debug!(pattern = rule.pattern(), start = found.start, "empty match skipped");
            return RuleOutcome::EmptyMatch { start: found.start };
        }

        if self.locks.overlaps(found.start..found.end()) {
            debug!(
                pattern = rule.pattern(),
                start = found.start,
                len = found.len,
                "match overlaps locked text"
            );
            return RuleOutcome::Locked {
                start: found.start,
                len: found.len,
            };
        }

        let replacement_len = rule.replacement().chars().count();
        self.text.remove(found.start..found.end());
        self.text.insert(found.start, rule.replacement());
        self.locks
            .update_after_replace(found.start, found.len, replacement_len);

        debug!(
            pattern = rule.pattern(),
            replacement = rule.replacement(),
            start = found.start,
            matched_len = found.len,
            replacement_len,
            "applied"
        );
        RuleOutcome::Applied {
            start: found.start,
            matched_len: found.len,
            replacement_len,
        }
    }

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// The character at `position` of the working text.
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.text.get_char(position)
    }

    pub fn finish(self) -> String {
        self.text.to_string()
    }
}
