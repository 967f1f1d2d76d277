//! Backtracking matcher for [`PatternDef`].
//!
//! All positions are **character** (not byte) indices into the text.

use crate::matcher::{Match, Matcher};

use super::ast::*;

/// Maximum number of backtracking steps before giving up.
const MAX_STEPS: usize = 100_000;

impl Matcher for PatternDef {
    fn find(&self, haystack: &[char], from: usize) -> Option<Match> {
        find_forward(self, haystack, from)
    }
}

/// Find the leftmost match whose middle context starts at or after `from`.
///
/// The returned span covers the middle context only.
pub fn find_forward(pattern: &PatternDef, text: &[char], from: usize) -> Option<Match> {
    let mut search = Search { text, steps: 0 };
    let len = text.len();

    if pattern.left.is_empty_pattern() {
        for mid_start in from..=len {
            if let Some(m) = search.middle_and_right(pattern, mid_start) {
                return Some(m);
            }
            if search.exhausted() {
                return None;
            }
        }
    } else {
        for outer_start in 0..=len {
            if let Some(mid_start) = search.compound(&pattern.left, outer_start)
                && mid_start >= from
                && let Some(m) = search.middle_and_right(pattern, mid_start)
            {
                return Some(m);
            }
            if search.exhausted() {
                return None;
            }
        }
    }
    None
}

struct Search<'t> {
    text: &'t [char],
    steps: usize,
}

impl Search<'_> {
    fn exhausted(&self) -> bool {
        self.steps > MAX_STEPS
    }

    fn middle_and_right(&mut self, pattern: &PatternDef, mid_start: usize) -> Option<Match> {
        let mid_end = self.compound(&pattern.middle, mid_start)?;
        self.compound(&pattern.right, mid_end)?;
        Some(Match::new(mid_start, mid_end - mid_start))
    }

    /// Match an alternation at `pos`, returning the end of the first
    /// alternative that succeeds. The empty compound matches immediately.
    fn compound(&mut self, compound: &Compound, pos: usize) -> Option<usize> {
        if compound.is_empty_pattern() {
            return Some(pos);
        }
        compound
            .alternatives
            .iter()
            .find_map(|seq| self.items(&seq.items, pos))
    }

    /// Match `items` in order, trying the greediest end position of each
    /// item first and backtracking into earlier items on failure.
    fn items(&mut self, items: &[Item], pos: usize) -> Option<usize> {
        self.steps += 1;
        if self.exhausted() {
            return None;
        }
        let Some((item, rest)) = items.split_first() else {
            return Some(pos);
        };
        for end in self.item_ends(item, pos) {
            if let Some(result) = self.items(rest, end) {
                return Some(result);
            }
        }
        None
    }

    fn item_ends(&mut self, item: &Item, pos: usize) -> Vec<usize> {
        match item.quantifier.bounds() {
            (lo, Some(hi)) if lo == hi => self.repeat_exact(&item.element, pos, lo).into_iter().collect(),
            (lo, hi) => {
                let unbounded = self.text.len() + 1;
                self.repeat_greedy(&item.element, pos, lo, hi.unwrap_or(unbounded))
            }
        }
    }

    /// End positions for `min..=max` repetitions, most repetitions first.
    fn repeat_greedy(&mut self, element: &Element, start: usize, min: usize, max: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        let mut cur = start;
        let mut count = 0;
        loop {
            if count >= min {
                ends.push(cur);
            }
            if count >= max {
                break;
            }
            match self.element(element, cur) {
                // zero-width elements would repeat forever
                Some(next) if next != cur => {
                    cur = next;
                    count += 1;
                }
                // a zero-width element can still satisfy the minimum
                Some(_) if count < min => {
                    ends.push(cur);
                    break;
                }
                _ => break,
            }
        }
        ends.reverse();
        ends
    }

    /// End position after exactly `n` repetitions.
    ///
    /// Each repetition either consumes a character or leaves the position
    /// where it was, so at most `text.len() + 1` of them are ever tried.
    fn repeat_exact(&mut self, element: &Element, start: usize, n: usize) -> Option<usize> {
        let mut cur = start;
        for _ in 0..n {
            self.steps += 1;
            if self.exhausted() {
                return None;
            }
            let next = self.element(element, cur)?;
            if next == cur {
                return Some(cur);
            }
            cur = next;
        }
        Some(cur)
    }

    fn element(&mut self, element: &Element, pos: usize) -> Option<usize> {
        match element {
            Element::CharSet(cs) => {
                let ch = *self.text.get(pos)?;
                cs.contains(ch).then_some(pos + 1)
            }
            Element::Literal { text, case_fold } => {
                let mut cur = pos;
                for want in text.chars() {
                    let got = *self.text.get(cur)?;
                    let same = if *case_fold {
                        got.eq_ignore_ascii_case(&want)
                    } else {
                        got == want
                    };
                    if !same {
                        return None;
                    }
                    cur += 1;
                }
                Some(cur)
            }
            Element::Group(compound) => self.compound(compound, pos),
            Element::Anchor(Anchor::Start) => (pos == 0).then_some(pos),
            Element::Anchor(Anchor::End) => (pos == self.text.len()).then_some(pos),
        }
    }
}
