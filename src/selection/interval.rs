//! Closed intervals over word positions.
//!
//! An interval `[start, end]` includes both endpoints. Two intervals
//! *touch* when one ends exactly one position before the other starts;
//! touching intervals describe one contiguous block and are always merged
//! by the selection tree.

use std::fmt;

use crate::error::SelectionError;

/// A word index in a transcript.
pub type Position = usize;

/// A closed range of positions, `[start, end]`, with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: Position,
    end: Position,
}

impl Interval {
    /// Create an interval, rejecting `start > end`.
    pub fn new(start: Position, end: Position) -> Result<Interval, SelectionError> {
        if start > end {
            return Err(SelectionError::InvalidRange { start, end });
        }
        return Ok(Interval { start, end });
    }

    /// An interval covering a single position.
    #[inline]
    pub fn point(index: Position) -> Interval {
        return Interval { start: index, end: index };
    }

    /// Callers guarantee `start <= end`.
    #[inline]
    pub(crate) fn new_unchecked(start: Position, end: Position) -> Interval {
        debug_assert!(start <= end, "interval [{}, {}] is reversed", start, end);
        return Interval { start, end };
    }

    #[inline]
    pub fn start(&self) -> Position {
        return self.start;
    }

    #[inline]
    pub fn end(&self) -> Position {
        return self.end;
    }

    /// Number of positions covered, saturating for `[0, usize::MAX]`.
    #[inline]
    pub fn len(&self) -> usize {
        return (self.end - self.start).saturating_add(1);
    }

    /// Always false; an interval covers at least one position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return false;
    }

    #[inline]
    pub fn contains(&self, index: Position) -> bool {
        return self.start <= index && index <= self.end;
    }

    /// True if `self` covers every position of `other`.
    #[inline]
    pub fn covers(&self, other: &Interval) -> bool {
        return self.start <= other.start && other.end <= self.end;
    }

    /// True if the two intervals overlap or touch.
    #[inline]
    pub fn touches(&self, other: &Interval) -> bool {
        return other.start <= self.end.saturating_add(1)
            && self.start <= other.end.saturating_add(1);
    }

    /// True if `self` lies entirely before `other` with at least one
    /// unselected position between them.
    #[inline]
    pub fn precedes(&self, other: &Interval) -> bool {
        return self.end.saturating_add(1) < other.start;
    }

    /// The smallest interval covering both.
    #[inline]
    pub fn hull(&self, other: &Interval) -> Interval {
        return Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        };
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "[{}, {}]", self.start, self.end);
    }
}

impl TryFrom<std::ops::RangeInclusive<Position>> for Interval {
    type Error = SelectionError;

    fn try_from(range: std::ops::RangeInclusive<Position>) -> Result<Self, Self::Error> {
        return Interval::new(*range.start(), *range.end());
    }
}
