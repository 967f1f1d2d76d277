//! Parsed form of a structured pattern.

/// A structured pattern split into its three context regions.
///
/// When a rule fires, only the span matched by `middle` is replaced and
/// locked. `left` must end exactly where `middle` starts and `right` must
/// start exactly where it ends, but neither is part of the match. For
/// `"walks ",+A` the match is the word after "walks ".
#[derive(Debug)]
pub struct PatternDef {
    pub left: Compound,
    pub middle: Compound,
    pub right: Compound,
}

/// `|`-separated alternatives, tried left to right.
///
/// No alternatives at all means "nothing to match": the region accepts the
/// empty span wherever it is tried. That is how absent contexts are stored.
#[derive(Debug)]
pub struct Compound {
    pub alternatives: Vec<Sequence>,
}

impl Compound {
    pub fn empty() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    pub fn is_empty_pattern(&self) -> bool {
        self.alternatives.is_empty()
    }
}

#[derive(Debug)]
pub struct Sequence {
    pub items: Vec<Item>,
}

#[derive(Debug)]
pub struct Item {
    pub quantifier: Quantifier,
    pub element: Element,
}

/// How many times an element repeats.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantifier {
    Once,
    ZeroOrMore,
    OneOrMore,
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Quantifier {
    /// Lower and upper repeat counts; `None` means no upper bound.
    pub fn bounds(&self) -> (usize, Option<usize>) {
        match *self {
            Quantifier::Once => (1, Some(1)),
            Quantifier::ZeroOrMore => (0, None),
            Quantifier::OneOrMore => (1, None),
            Quantifier::Exactly(n) => (n, Some(n)),
            Quantifier::AtLeast(n) => (n, None),
            Quantifier::Between(lo, hi) => (lo, Some(hi)),
        }
    }
}

#[derive(Debug)]
pub enum Element {
    CharSet(CharSet),
    Group(Box<Compound>),
    /// Quoted text; single quotes fold ASCII case.
    Literal {
        text: String,
        case_fold: bool,
    },
    /// Zero-width test on the position itself.
    Anchor(Anchor),
}

/// One character drawn from `kind`, or from outside it when `negated`.
#[derive(Debug)]
pub struct CharSet {
    pub negated: bool,
    pub kind: CharSetKind,
}

#[derive(Debug)]
pub enum CharSetKind {
    Alpha,
    Upper,
    Lower,
    /// ASCII digits.
    Numeric,
    /// The ASCII space only.
    Space,
    Punct,
    /// 0x20 to 0x7E.
    Printable,
    /// `D/.../`: listed characters and `a..z` ranges.
    Custom(Vec<CharClass>),
}

#[derive(Debug)]
pub enum CharClass {
    Single(char),
    Range(char, char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `<`: position 0 of the working text.
    Start,
    /// `>`: one past its last character.
    End,
}
