//! Tree nodes and the copy-on-write algorithms behind `Selection`.
//!
//! A node is either a leaf holding one selected interval, or an internal node
//! owning exactly two children plus the tightest interval bounding both.
//! Children sit behind `Arc` so that every edit rebuilds only the path from
//! the root to the touched leaf; everything else is shared with the previous
//! snapshot and never mutated.
//!
//! Complexity:
//! - contains: O(depth)
//! - insert: O(depth) plus a depth probe per gap insert
//! - remove: O(depth)
//!
//! Depth is not bounded by any rebalancing. Inserting into a gap descends
//! into the shallower child, which keeps typical selections shallow, but an
//! adversarial order can still build a chain as long as the number of blocks.

use std::sync::Arc;

use tracing::{debug, trace};

use super::interval::{Interval, Position};
use crate::error::SelectionError;

/// A node of the selection tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// One contiguous block of selected positions.
    Leaf(Interval),
    /// Two subtrees, `left` entirely before `right`.
    Internal {
        /// Always `[left.start, right.end]`.
        bounds: Interval,
        left: Arc<Node>,
        right: Arc<Node>,
    },
}

/// The child an insert grew.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Node {
    pub fn leaf(interval: Interval) -> Node {
        return Node::Leaf(interval);
    }

    /// Join two subtrees under a new internal node.
    ///
    /// Nothing checks that `left` precedes `right`; trees built this way are
    /// validated when turned into a `Selection`.
    pub fn internal(left: Node, right: Node) -> Node {
        let bounds = left.bounds().hull(&right.bounds());
        return Node::Internal {
            bounds,
            left: Arc::new(left),
            right: Arc::new(right),
        };
    }

    pub(crate) fn join(left: Arc<Node>, right: Arc<Node>) -> Node {
        let bounds = Interval::new_unchecked(left.bounds().start(), right.bounds().end());
        return Node::Internal { bounds, left, right };
    }

    /// The interval spanned by this subtree.
    #[inline]
    pub fn bounds(&self) -> Interval {
        return match self {
            Node::Leaf(interval) => *interval,
            Node::Internal { bounds, .. } => *bounds,
        };
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        return matches!(self, Node::Leaf(_));
    }

    /// The two children of an internal node.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        return match self {
            Node::Leaf(_) => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        };
    }

    /// Length of the longest path from this node to a leaf, counting both ends.
    pub fn depth(&self) -> usize {
        return match self {
            Node::Leaf(_) => 1,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        };
    }

    pub fn contains(&self, index: Position) -> bool {
        let mut current = self;
        loop {
            match current {
                Node::Leaf(interval) => return interval.contains(index),
                Node::Internal { left, right, .. } => {
                    if left.bounds().contains(index) {
                        current = left;
                    } else if right.bounds().contains(index) {
                        current = right;
                    } else {
                        return false;
                    }
                }
            }
        }
    }
}

/// Union `range` into the subtree, returning the new subtree root.
pub(crate) fn insert(node: &Arc<Node>, range: Interval) -> Arc<Node> {
    let (bounds, left, right) = match node.as_ref() {
        Node::Leaf(current) => return insert_into_leaf(node, *current, range),
        Node::Internal { bounds, left, right } => (*bounds, left, right),
    };

    if bounds.precedes(&range) {
        trace!(%bounds, %range, "wrapping subtree, range far right");
        return Arc::new(Node::join(Arc::clone(node), Arc::new(Node::Leaf(range))));
    }
    if range.precedes(&bounds) {
        trace!(%bounds, %range, "wrapping subtree, range far left");
        return Arc::new(Node::join(Arc::new(Node::Leaf(range)), Arc::clone(node)));
    }

    let side = if left.bounds().touches(&range) {
        Side::Left
    } else if right.bounds().touches(&range) {
        Side::Right
    } else if left.depth() > right.depth() {
        // Range falls in the gap between the children: grow the shallower one.
        Side::Right
    } else {
        Side::Left
    };

    return match side {
        Side::Left => merge(insert(left, range), Arc::clone(right), Side::Left),
        Side::Right => merge(Arc::clone(left), insert(right, range), Side::Right),
    };
}

fn insert_into_leaf(node: &Arc<Node>, current: Interval, range: Interval) -> Arc<Node> {
    if current.covers(&range) {
        return Arc::clone(node);
    }
    if current.touches(&range) {
        return Arc::new(Node::Leaf(current.hull(&range)));
    }

    trace!(%current, %range, "splitting leaf");
    let fresh = Arc::new(Node::Leaf(range));
    if range.precedes(&current) {
        return Arc::new(Node::join(fresh, Arc::clone(node)));
    }
    return Arc::new(Node::join(Arc::clone(node), fresh));
}

/// Rebuild an internal node after one child grew, merging the children if
/// they now touch.
///
/// Leaves of the unchanged child that the grown child reaches are absorbed
/// into the grown child's boundary leaf. With two leaf children this
/// collapses the node into a single leaf.
fn merge(left: Arc<Node>, right: Arc<Node>, grown: Side) -> Arc<Node> {
    if left.bounds().precedes(&right.bounds()) {
        return Arc::new(Node::join(left, right));
    }

    return match grown {
        Side::Left => {
            let limit = left.bounds().end().saturating_add(1);
            let (rest, reach) = take_prefix(&right, limit);
            let widened = match reach {
                Some(end) => widen_last(&left, end),
                None => left,
            };
            match rest {
                Some(rest) => {
                    debug!(left = %widened.bounds(), right = %rest.bounds(), "absorbed leaves from right sibling");
                    Arc::new(Node::join(widened, rest))
                }
                None => {
                    debug!(bounds = %widened.bounds(), "collapsed node");
                    widened
                }
            }
        }
        Side::Right => {
            let limit = right.bounds().start();
            let (rest, reach) = take_suffix(&left, limit);
            let widened = match reach {
                Some(start) => widen_first(&right, start),
                None => right,
            };
            match rest {
                Some(rest) => {
                    debug!(left = %rest.bounds(), right = %widened.bounds(), "absorbed leaves from left sibling");
                    Arc::new(Node::join(rest, widened))
                }
                None => {
                    debug!(bounds = %widened.bounds(), "collapsed node");
                    widened
                }
            }
        }
    };
}

/// Remove every leaf starting at or before `limit`.
///
/// Returns what is left of the subtree and the largest end among the removed
/// leaves.
fn take_prefix(node: &Arc<Node>, limit: Position) -> (Option<Arc<Node>>, Option<Position>) {
    match node.as_ref() {
        Node::Leaf(interval) => {
            if interval.start() <= limit {
                return (None, Some(interval.end()));
            }
            return (Some(Arc::clone(node)), None);
        }
        Node::Internal { bounds, left, right } => {
            if bounds.start() > limit {
                return (Some(Arc::clone(node)), None);
            }
            let (left_rest, left_reach) = take_prefix(left, limit);
            if let Some(left_rest) = left_rest {
                return (Some(Arc::new(Node::join(left_rest, Arc::clone(right)))), left_reach);
            }
            let (right_rest, right_reach) = take_prefix(right, limit);
            return (right_rest, right_reach.or(left_reach));
        }
    }
}

/// Remove every leaf ending at or after `limit - 1`, i.e. every leaf that
/// overlaps or touches a block starting at `limit`.
///
/// Returns what is left of the subtree and the smallest start among the
/// removed leaves.
fn take_suffix(node: &Arc<Node>, limit: Position) -> (Option<Arc<Node>>, Option<Position>) {
    match node.as_ref() {
        Node::Leaf(interval) => {
            if interval.end().saturating_add(1) >= limit {
                return (None, Some(interval.start()));
            }
            return (Some(Arc::clone(node)), None);
        }
        Node::Internal { bounds, left, right } => {
            if bounds.end().saturating_add(1) < limit {
                return (Some(Arc::clone(node)), None);
            }
            let (right_rest, right_reach) = take_suffix(right, limit);
            if let Some(right_rest) = right_rest {
                return (Some(Arc::new(Node::join(Arc::clone(left), right_rest))), right_reach);
            }
            let (left_rest, left_reach) = take_suffix(left, limit);
            return (left_rest, left_reach.or(right_reach));
        }
    }
}

/// Extend the rightmost leaf so it ends no earlier than `end`.
fn widen_last(node: &Arc<Node>, end: Position) -> Arc<Node> {
    return match node.as_ref() {
        Node::Leaf(interval) if interval.end() >= end => Arc::clone(node),
        Node::Leaf(interval) => Arc::new(Node::Leaf(Interval::new_unchecked(interval.start(), end))),
        Node::Internal { left, right, .. } => {
            Arc::new(Node::join(Arc::clone(left), widen_last(right, end)))
        }
    };
}

/// Extend the leftmost leaf so it starts no later than `start`.
fn widen_first(node: &Arc<Node>, start: Position) -> Arc<Node> {
    return match node.as_ref() {
        Node::Leaf(interval) if interval.start() <= start => Arc::clone(node),
        Node::Leaf(interval) => Arc::new(Node::Leaf(Interval::new_unchecked(start, interval.end()))),
        Node::Internal { left, right, .. } => {
            Arc::new(Node::join(widen_first(left, start), Arc::clone(right)))
        }
    };
}

/// Remove a single position from the subtree.
///
/// `Ok(None)` means the subtree vanished.
pub(crate) fn remove(node: &Arc<Node>, index: Position) -> Result<Option<Arc<Node>>, SelectionError> {
    match node.as_ref() {
        Node::Leaf(interval) => {
            if !interval.contains(index) {
                return Err(SelectionError::PositionNotSelected { index });
            }
            let (start, end) = (interval.start(), interval.end());
            if start == end {
                return Ok(None);
            }
            if index == start {
                return Ok(Some(Arc::new(Node::Leaf(Interval::new_unchecked(index + 1, end)))));
            }
            if index == end {
                return Ok(Some(Arc::new(Node::Leaf(Interval::new_unchecked(start, index - 1)))));
            }
            debug!(%interval, index, "splitting leaf around deleted position");
            let before = Arc::new(Node::Leaf(Interval::new_unchecked(start, index - 1)));
            let after = Arc::new(Node::Leaf(Interval::new_unchecked(index + 1, end)));
            return Ok(Some(Arc::new(Node::join(before, after))));
        }
        Node::Internal { left, right, .. } => {
            if left.bounds().contains(index) {
                return Ok(match remove(left, index)? {
                    Some(left) => Some(Arc::new(Node::join(left, Arc::clone(right)))),
                    None => {
                        debug!(bounds = %right.bounds(), "promoting right sibling");
                        Some(Arc::clone(right))
                    }
                });
            }
            if right.bounds().contains(index) {
                return Ok(match remove(right, index)? {
                    Some(right) => Some(Arc::new(Node::join(Arc::clone(left), right))),
                    None => {
                        debug!(bounds = %left.bounds(), "promoting left sibling");
                        Some(Arc::clone(left))
                    }
                });
            }
            return Err(SelectionError::PositionNotSelected { index });
        }
    }
}
