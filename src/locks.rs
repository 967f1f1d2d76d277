//! Locked positions in the working text.
//!
//! A locked position is a character produced by a replacement earlier in the
//! pass. Like editor marks, locked positions follow the text they denote:
//! when an edit changes the length of the text before them they move by the
//! same amount.

use std::collections::BTreeSet;
use std::ops::Range;

use itertools::Itertools;

/// An ordered set of locked character offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSet {
    positions: BTreeSet<usize>,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Locked positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    /// Lock every position in `range`.
    pub fn lock_range(&mut self, range: Range<usize>) {
        self.positions.extend(range);
    }

    /// Whether any position in `range` is locked.
    pub fn overlaps(&self, range: Range<usize>) -> bool {
        !range.is_empty() && self.positions.range(range).next().is_some()
    }

    /// Unlock every position in `range`.
    pub fn remove_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let doomed = self.positions.range(range).copied().collect_vec();
        for position in doomed {
            self.positions.remove(&position);
        }
    }

    /// Move every position for which `pred` holds by `delta`.
    ///
    /// Positions are taken out highest first and only re-inserted once all
    /// of them are out, so a shifted position never lands on (and merges
    /// with) an entry that is itself still waiting to move.
    ///
    /// Shifting a position below zero is a caller bug; such positions
    /// saturate at zero.
    pub fn shift_where<P>(&mut self, pred: P, delta: isize)
    where
        P: Fn(usize) -> bool,
    {
        if delta == 0 {
            return;
        }
        let moving = self.positions.iter().rev().copied().filter(|&p| pred(p)).collect_vec();
        for position in &moving {
            self.positions.remove(position);
        }
        for position in moving {
            let shifted = position.saturating_add_signed(delta);
            tracing::trace!(from = position, to = shifted, "shift lock");
            self.positions.insert(shifted);
        }
    }

    /// Update the set after `matched_len` characters at `start` were
    /// replaced by `replacement_len` new characters.
    ///
    /// - Positions before `start` don't move.
    /// - Positions inside the replaced span are gone with the text they
    ///   denoted.
    /// - Positions after the replaced span move by the length delta.
    /// - The inserted text becomes locked.
    pub fn update_after_replace(&mut self, start: usize, matched_len: usize, replacement_len: usize) {
        let end = start + matched_len;
        let delta = replacement_len as isize - matched_len as isize;
        self.remove_range(start..end);
        self.shift_where(|p| p >= end, delta);
        self.lock_range(start..start + replacement_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locks(positions: &[usize]) -> LockSet {
        let mut set = LockSet::new();
        for &p in positions {
            set.lock_range(p..p + 1);
        }
        set
    }

    fn positions(set: &LockSet) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn lock_and_query() {
        let mut set = LockSet::new();
        assert!(set.is_empty());
        set.lock_range(3..6);
        assert_eq!(positions(&set), [3, 4, 5]);
        assert!(set.contains(5));
        assert!(!set.contains(6));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn overlap_checks_are_half_open() {
        let set = locks(&[3, 4, 5]);
        assert!(set.overlaps(0..4));
        assert!(set.overlaps(5..9));
        assert!(!set.overlaps(0..3));
        assert!(!set.overlaps(6..9));
        assert!(!set.overlaps(4..4));
    }

    #[test]
    fn shift_forward_keeps_every_entry() {
        // consecutive entries shifted by +1 would collide if moved lowest first
        let mut set = locks(&[2, 3, 4, 9]);
        set.shift_where(|p| p >= 3, 1);
        assert_eq!(positions(&set), [2, 4, 5, 10]);
    }

    #[test]
    fn shift_backward_keeps_every_entry() {
        let mut set = locks(&[1, 6, 7, 8]);
        set.shift_where(|p| p >= 6, -4);
        assert_eq!(positions(&set), [1, 2, 3, 4]);
    }

    #[test]
    fn shift_by_zero_is_identity() {
        let mut set = locks(&[1, 2, 3]);
        set.shift_where(|_| true, 0);
        assert_eq!(positions(&set), [1, 2, 3]);
    }

    #[test]
    fn shift_only_touches_matching_entries() {
        let mut set = locks(&[1, 5, 10]);
        set.shift_where(|p| p == 5, 2);
        assert_eq!(positions(&set), [1, 7, 10]);
    }

    #[test]
    fn remove_range_unlocks() {
        let mut set = locks(&[1, 2, 3, 4]);
        set.remove_range(2..4);
        assert_eq!(positions(&set), [1, 4]);
    }

    #[test]
    fn replace_with_growth() {
        // "ab[cd]ef" -> "ab[wxyz]ef", with 'a' and 'f' locked
        let mut set = locks(&[0, 5]);
        set.update_after_replace(2, 2, 4);
        assert_eq!(positions(&set), [0, 2, 3, 4, 5, 7]);
    }

    #[test]
    fn replace_with_shrink() {
        // "ab[cdef]gh" -> "ab[x]gh", with 'a', 'g' and 'h' locked
        let mut set = locks(&[0, 6, 7]);
        set.update_after_replace(2, 4, 1);
        assert_eq!(positions(&set), [0, 2, 3, 4]);
    }

    #[test]
    fn replace_with_deletion() {
        // "a(b)" -> "ab)" when "(" is deleted; the locked ")" moves back
        let mut set = locks(&[3]);
        set.update_after_replace(1, 1, 0);
        assert_eq!(positions(&set), [2]);
    }

    #[test]
    fn position_right_after_match_moves() {
        // the character immediately after the matched span is outside it
        let mut set = locks(&[4]);
        set.update_after_replace(1, 3, 1);
        assert_eq!(positions(&set), [1, 2]);
    }

    #[test]
    fn replace_drops_positions_inside_span() {
        let mut set = locks(&[2, 3]);
        set.update_after_replace(1, 4, 1);
        assert_eq!(positions(&set), [1]);
    }
}
