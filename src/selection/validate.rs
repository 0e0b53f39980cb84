//! Structural checks for selection trees.
//!
//! Every public operation preserves these invariants; the checks exist so
//! tests, fuzzers and `TryFrom<Node>` can verify trees built elsewhere.

use thiserror::Error;

use super::interval::Interval;
use super::node::Node;

/// The first broken invariant found in a tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node bounds {stored} do not match children span {expected}")]
    StaleBounds { stored: Interval, expected: Interval },

    #[error("leaves {left} and {right} are out of order or overlap")]
    Unordered { left: Interval, right: Interval },

    #[error("leaves {left} and {right} touch and should have been merged")]
    Unmerged { left: Interval, right: Interval },
}

/// Check bounds on every internal node and the ordering of consecutive
/// leaves.
pub(crate) fn check(root: &Node) -> Result<(), InvariantViolation> {
    check_bounds(root)?;
    let mut previous: Option<Interval> = None;
    for leaf in super::iter::Ranges::new(Some(root)) {
        if let Some(left) = previous {
            if leaf.start() <= left.end() {
                return Err(InvariantViolation::Unordered { left, right: leaf });
            }
            if !left.precedes(&leaf) {
                return Err(InvariantViolation::Unmerged { left, right: leaf });
            }
        }
        previous = Some(leaf);
    }
    return Ok(());
}

fn check_bounds(node: &Node) -> Result<(), InvariantViolation> {
    if let Node::Internal { bounds, left, right } = node {
        check_bounds(left)?;
        check_bounds(right)?;
        let (start, end) = (left.bounds().start(), right.bounds().end());
        if start > end || bounds.start() != start || bounds.end() != end {
            return Err(InvariantViolation::StaleBounds {
                stored: *bounds,
                expected: Interval::new_unchecked(start.min(end), end.max(start)),
            });
        }
    }
    return Ok(());
}
