//! Flat reference implementation of word-range selections.
//!
//! `NaiveSelection` keeps the canonical intervals in one sorted `Vec` and
//! rebuilds it on every edit. It is slow and obviously correct, which is the
//! point: the tree engine in `vitexte` is tested against it.
//!
//! Invariants (always held):
//!    - intervals are sorted by start
//!    - intervals are closed, `[start, end]`
//!    - consecutive intervals are separated by at least one unselected position
//!
//! Complexity:
//!    - contains: O(log n)
//!    - select, delete_index: O(n)

/// Why an edit was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NaiveError {
    InvalidRange { start: usize, end: usize },
    PositionNotSelected { index: usize },
}

/// A sorted list of disjoint, non-touching closed intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveSelection {
    intervals: Vec<(usize, usize)>,
}

impl NaiveSelection {
    pub fn new() -> Self {
        NaiveSelection { intervals: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The canonical intervals in ascending order.
    pub fn ranges(&self) -> &[(usize, usize)] {
        &self.intervals
    }

    /// Number of selected positions.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(|(start, end)| end - start + 1).sum()
    }

    pub fn contains(&self, index: usize) -> bool {
        // First interval starting after `index`; the one before it is the
        // only candidate.
        let after = self.intervals.partition_point(|&(start, _)| start <= index);
        after > 0 && self.intervals[after - 1].1 >= index
    }

    /// Union `[start, end]` into the set.
    pub fn select(&self, start: usize, end: usize) -> Result<Self, NaiveError> {
        if start > end {
            return Err(NaiveError::InvalidRange { start, end });
        }
        let mut merged = Vec::with_capacity(self.intervals.len() + 1);
        let (mut lo, mut hi) = (start, end);
        let mut placed = false;
        for &(s, e) in &self.intervals {
            if e.saturating_add(1) < lo {
                merged.push((s, e));
            } else if hi.saturating_add(1) < s {
                if !placed {
                    merged.push((lo, hi));
                    placed = true;
                }
                merged.push((s, e));
            } else {
                // Overlapping or touching: absorb.
                lo = lo.min(s);
                hi = hi.max(e);
            }
        }
        if !placed {
            merged.push((lo, hi));
        }
        Ok(NaiveSelection { intervals: merged })
    }

    /// Remove one selected position.
    pub fn delete_index(&self, index: usize) -> Result<Self, NaiveError> {
        let missing = NaiveError::PositionNotSelected { index };
        let i = self
            .intervals
            .iter()
            .position(|&(s, e)| s <= index && index <= e)
            .ok_or(missing)?;
        let (s, e) = self.intervals[i];
        let mut intervals = self.intervals.clone();
        let mut pieces = Vec::with_capacity(2);
        if s < index {
            pieces.push((s, index - 1));
        }
        if index < e {
            pieces.push((index + 1, e));
        }
        intervals.splice(i..=i, pieces);
        Ok(NaiveSelection { intervals })
    }
}
