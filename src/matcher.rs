//! The matching capability rules are built on.
//!
//! A [`Matcher`] answers one question: where is the first match at or after
//! a given position? The engine never asks for more than that.

/// A matched span, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last matched character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Find the first match in `haystack` starting the search at `from`.
pub trait Matcher {
    fn find(&self, haystack: &[char], from: usize) -> Option<Match>;
}

/// Exact character-sequence search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    needle: Vec<char>,
}

impl Literal {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.chars().collect(),
        }
    }
}

impl Matcher for Literal {
    fn find(&self, haystack: &[char], from: usize) -> Option<Match> {
        if self.needle.is_empty() {
            return (from <= haystack.len()).then(|| Match::new(from, 0));
        }
        haystack
            .get(from..)?
            .windows(self.needle.len())
            .position(|window| window == self.needle.as_slice())
            .map(|offset| Match::new(from + offset, self.needle.len()))
    }
}
