//! In-order traversal of the selected intervals.

use smallvec::SmallVec;

use super::interval::Interval;
use super::node::Node;

/// Pending right subtrees. Typical selections are shallow, so the stack
/// rarely spills to the heap.
type Stack<'a> = SmallVec<[&'a Node; 16]>;

/// Iterator over the leaves of a selection, in ascending order.
#[derive(Clone, Debug)]
pub struct Ranges<'a> {
    stack: Stack<'a>,
}

impl<'a> Ranges<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Ranges<'a> {
        let mut stack = Stack::new();
        if let Some(root) = root {
            stack.push(root);
        }
        return Ranges { stack };
    }
}

impl Iterator for Ranges<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        let mut node = self.stack.pop()?;
        loop {
            match node {
                Node::Leaf(interval) => return Some(*interval),
                Node::Internal { left, right, .. } => {
                    self.stack.push(right);
                    node = left;
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Ranges<'_> {}
