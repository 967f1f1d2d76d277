//! Character set membership for structured patterns.

use super::ast::{CharClass, CharSet, CharSetKind};

const PUNCTUATION: &str = "(),.;:\"'!?-`";

impl CharSet {
    /// Test whether `ch` is a member of this set, honouring negation.
    pub fn contains(&self, ch: char) -> bool {
        self.kind.contains(ch) != self.negated
    }
}

impl CharSetKind {
    fn contains(&self, ch: char) -> bool {
        match self {
            CharSetKind::Alpha => ch.is_alphabetic(),
            CharSetKind::Upper => ch.is_uppercase(),
            CharSetKind::Lower => ch.is_lowercase(),
            CharSetKind::Numeric => ch.is_ascii_digit(),
            CharSetKind::Space => ch == ' ',
            CharSetKind::Punct => PUNCTUATION.contains(ch),
            CharSetKind::Printable => (' '..='~').contains(&ch),
            CharSetKind::Custom(classes) => classes.iter().any(|c| c.contains(ch)),
        }
    }
}

impl CharClass {
    fn contains(&self, ch: char) -> bool {
        match *self {
            CharClass::Single(c) => c == ch,
            CharClass::Range(lo, hi) => (lo..=hi).contains(&ch),
        }
    }
}
