/// What happened to a single rule during a replacement pass.
///
/// Only `Applied` changes the text; every other outcome leaves the text and
/// the locked positions exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The first match was replaced and the inserted text locked.
    Applied {
        start: usize,
        matched_len: usize,
        replacement_len: usize,
    },
    /// The pattern does not occur in the current text.
    NoMatch,
    /// The first match was zero characters wide.
    EmptyMatch { start: usize },
    /// The first match overlaps text produced by an earlier rule.
    Locked { start: usize, len: usize },
}

impl RuleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RuleOutcome::Applied { .. })
    }

    /// Change in text length caused by this rule.
    pub fn length_delta(&self) -> isize {
        match *self {
            RuleOutcome::Applied {
                matched_len,
                replacement_len,
                ..
            } => replacement_len as isize - matched_len as isize,
            _ => 0,
        }
    }
}
