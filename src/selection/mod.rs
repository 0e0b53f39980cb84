//! Persistent selection of word ranges.
//!
//! A `Selection` is a set of word positions stored as a binary tree of
//! disjoint intervals. The set is always canonical: leaves are ascending,
//! never overlap and never touch (`[4, 5]` and `[6, 8]` are stored as
//! `[4, 8]`).
//!
//! Selections are values. `select` and `delete_index` return a new selection
//! and leave the receiver untouched, so an editor can keep older selections
//! around (for undo, say) at the cost of only the nodes on the edited path.
//!
//! ```
//! use vitexte::selection::Selection;
//!
//! let selection = Selection::new().select(4, 8)?;
//! let split = selection.delete_index(6)?;
//! assert_eq!(split.to_string(), "{[4, 5], [7, 8]}");
//!
//! let merged = split.select(6, 6)?;
//! assert_eq!(merged.to_string(), "{[4, 8]}");
//! assert!(selection.contains(6));
//! # Ok::<(), vitexte::error::SelectionError>(())
//! ```

mod interval;
mod iter;
mod node;
mod validate;

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::error::SelectionError;

pub use interval::{Interval, Position};
pub use iter::Ranges;
pub use node::Node;
pub use validate::InvariantViolation;

/// An immutable set of selected word positions.
///
/// Equality is structural: two selections holding the same positions but
/// built in a different order may differ in shape. Compare `ranges()` to
/// compare contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    root: Option<Arc<Node>>,
}

impl Selection {
    /// The empty selection.
    pub fn new() -> Selection {
        return Selection { root: None };
    }

    pub fn is_empty(&self) -> bool {
        return self.root.is_none();
    }

    /// The tree backing this selection.
    pub fn root(&self) -> Option<&Node> {
        return self.root.as_deref();
    }

    /// Add every position in `[start, end]`.
    ///
    /// Fails with `InvalidRange` if `start > end`.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn select(&self, start: Position, end: Position) -> Result<Selection, SelectionError> {
        let range = Interval::new(start, end)?;
        return Ok(self.select_interval(range));
    }

    /// Add every position of an already validated interval.
    pub fn select_interval(&self, range: Interval) -> Selection {
        let root = match &self.root {
            None => Arc::new(Node::Leaf(range)),
            Some(root) => node::insert(root, range),
        };
        return Selection { root: Some(root) };
    }

    /// Remove a single position.
    ///
    /// Fails with `PositionNotSelected` if `index` is not currently selected,
    /// which includes every index of the empty selection.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn delete_index(&self, index: Position) -> Result<Selection, SelectionError> {
        let root = self
            .root
            .as_ref()
            .ok_or(SelectionError::PositionNotSelected { index })?;
        return Ok(Selection {
            root: node::remove(root, index)?,
        });
    }

    /// Whether `index` is selected. O(depth).
    pub fn contains(&self, index: Position) -> bool {
        return match &self.root {
            None => false,
            Some(root) => root.contains(index),
        };
    }

    /// The selected intervals in ascending order.
    pub fn ranges(&self) -> Ranges<'_> {
        return Ranges::new(self.root());
    }

    /// First and last selected positions.
    pub fn bounds(&self) -> Option<Interval> {
        return self.root.as_ref().map(|root| root.bounds());
    }

    /// Number of selected positions.
    pub fn len(&self) -> usize {
        return self.ranges().map(|range| range.len()).sum();
    }

    /// Number of disjoint intervals.
    pub fn interval_count(&self) -> usize {
        return self.ranges().count();
    }

    /// Longest root-to-leaf path; 0 for the empty selection.
    pub fn depth(&self) -> usize {
        return self.root.as_ref().map_or(0, |root| root.depth());
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        return match &self.root {
            None => Ok(()),
            Some(root) => validate::check(root),
        };
    }

    /// Build a selection by selecting each `(start, end)` pair in turn.
    pub fn try_from_ranges<I>(ranges: I) -> Result<Selection, SelectionError>
    where
        I: IntoIterator<Item = (Position, Position)>,
    {
        let mut selection = Selection::new();
        for (start, end) in ranges {
            selection = selection.select(start, end)?;
        }
        return Ok(selection);
    }
}

impl FromIterator<Interval> for Selection {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Selection {
        return iter
            .into_iter()
            .fold(Selection::new(), |selection, range| selection.select_interval(range));
    }
}

impl TryFrom<Node> for Selection {
    type Error = InvariantViolation;

    fn try_from(root: Node) -> Result<Selection, InvariantViolation> {
        validate::check(&root)?;
        return Ok(Selection {
            root: Some(Arc::new(root)),
        });
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, range) in self.ranges().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        return write!(f, "}}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(start: Position, end: Position) -> Node {
        return Node::leaf(Interval::new(start, end).unwrap());
    }

    fn ranges(selection: &Selection) -> Vec<(Position, Position)> {
        return selection.ranges().map(|r| (r.start(), r.end())).collect();
    }

    #[test]
    fn empty_selection() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
        assert_eq!(selection.depth(), 0);
        assert_eq!(selection.bounds(), None);
        assert!(!selection.contains(0));
        assert_eq!(selection.to_string(), "{}");
        assert!(selection.check_invariants().is_ok());
    }

    #[test]
    fn select_rejects_reversed_range() {
        let err = Selection::new().select(9, 3).unwrap_err();
        assert_eq!(err, SelectionError::InvalidRange { start: 9, end: 3 });
    }

    #[test]
    fn delete_on_empty_fails() {
        let err = Selection::new().delete_index(5).unwrap_err();
        assert_eq!(err, SelectionError::PositionNotSelected { index: 5 });
    }

    #[test]
    fn delete_outside_leaf_fails() {
        let selection = Selection::new().select(10, 20).unwrap();
        let err = selection.delete_index(25).unwrap_err();
        assert_eq!(err, SelectionError::PositionNotSelected { index: 25 });
    }

    #[test]
    fn delete_cases_on_a_leaf() {
        let selection = Selection::new().select(10, 20).unwrap();
        assert_eq!(ranges(&selection.delete_index(10).unwrap()), vec![(11, 20)]);
        assert_eq!(ranges(&selection.delete_index(20).unwrap()), vec![(10, 19)]);
        assert_eq!(
            ranges(&selection.delete_index(15).unwrap()),
            vec![(10, 14), (16, 20)]
        );

        let single = Selection::new().select(7, 7).unwrap();
        assert!(single.delete_index(7).unwrap().is_empty());
    }

    #[test]
    fn counts_and_bounds() {
        let selection = Selection::try_from_ranges([(2, 4), (10, 10), (20, 29)]).unwrap();
        assert_eq!(selection.len(), 14);
        assert_eq!(selection.interval_count(), 3);
        assert_eq!(selection.bounds(), Interval::new(2, 29).ok());
        assert_eq!(selection.to_string(), "{[2, 4], [10, 10], [20, 29]}");
    }

    #[test]
    fn from_iterator_merges() {
        let selection: Selection = [Interval::point(3), Interval::point(5), Interval::point(4)]
            .into_iter()
            .collect();
        assert_eq!(ranges(&selection), vec![(3, 5)]);
    }

    #[test]
    fn try_from_node_validates() {
        let good = Node::internal(leaf(1, 2), leaf(5, 6));
        assert!(Selection::try_from(good).is_ok());

        let touching = Node::internal(leaf(1, 2), leaf(3, 6));
        assert!(matches!(
            Selection::try_from(touching),
            Err(InvariantViolation::Unmerged { .. })
        ));

        let overlapping = Node::internal(leaf(1, 4), leaf(3, 6));
        assert!(matches!(
            Selection::try_from(overlapping),
            Err(InvariantViolation::Unordered { .. })
        ));

        let stale = Node::Internal {
            bounds: Interval::new(0, 6).unwrap(),
            left: Arc::new(leaf(1, 2)),
            right: Arc::new(leaf(5, 6)),
        };
        assert!(matches!(
            Selection::try_from(stale),
            Err(InvariantViolation::StaleBounds { .. })
        ));
    }

    #[test]
    fn old_snapshots_survive_edits() {
        let first = Selection::new().select(4, 8).unwrap();
        let second = first.delete_index(6).unwrap();
        let third = second.select(20, 22).unwrap();

        assert_eq!(ranges(&first), vec![(4, 8)]);
        assert_eq!(ranges(&second), vec![(4, 5), (7, 8)]);
        assert_eq!(ranges(&third), vec![(4, 5), (7, 8), (20, 22)]);
    }

    #[test]
    fn selection_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Selection>();
    }
}
